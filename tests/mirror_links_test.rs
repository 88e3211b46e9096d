use vidinfo::{extract, extract_with_options, Locale, Options, UNKNOWN_AUTHOR};

const EPISODE_PAGE: &str = r#"
<html>
  <head><title>Frieren 12 - OgladajAnime</title></head>
  <body>
    <h1 class="entry-title">Frieren odcinek 12</h1>
    <div class="post-thumbnail"><img src="/covers/frieren.jpg"></div>
    <div class="episode-links">
      <div class="link-container">
        <span class="author-name">Alice</span>
        <a href="https://voe.sx/e/abc">voe</a>
        <span class="link-desc">1080p napisy</span>
      </div>
      <div class="link-container">
        <span class="author-name">Bob</span>
        <a href="https://dood.to/e/xyz">https://dood.to/e/xyz</a>
      </div>
      <div class="link-container">
        <span class="author-name">Carol</span>
        <a href="https://voe.sx/e/abc/">voe again</a>
      </div>
      <div class="link-container">
        <a href="/player/4">Player 4</a>
      </div>
      <div class="link-container">
        <span class="author-name">No Link</span>
        <a href="javascript:void(0)">broken</a>
      </div>
    </div>
  </body>
</html>
"#;

#[test]
fn override_page_uses_site_lookups() {
    let info = extract(EPISODE_PAGE, "https://ogladajanime.pl/anime/frieren/12");
    assert_eq!(info.title, "Frieren odcinek 12");
    assert_eq!(info.thumbnail, "https://ogladajanime.pl/covers/frieren.jpg");
    assert_eq!(info.site.as_deref(), Some("ogladajanime"));
    assert!(info.is_override_site());
}

#[test]
fn containers_yield_deduplicated_links_in_order() {
    let info = extract(EPISODE_PAGE, "https://ogladajanime.pl/anime/frieren/12");
    let urls: Vec<&str> = info.mirror_links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "https://voe.sx/e/abc",
            "https://dood.to/e/xyz",
            "https://ogladajanime.pl/player/4",
        ]
    );

    let first = &info.mirror_links[0];
    assert_eq!(first.author, "Alice");
    assert_eq!(first.description, "1080p napisy");
}

#[test]
fn description_falls_back_to_link_text_then_placeholder() {
    let info = extract(EPISODE_PAGE, "https://ogladajanime.pl/anime/frieren/12");

    // Link text equal to the URL is not a description.
    assert_eq!(info.mirror_links[1].description, "Link do odcinka");
    assert_eq!(info.mirror_links[2].description, "Player 4");
    assert_eq!(info.mirror_links[2].author, UNKNOWN_AUTHOR);
}

#[test]
fn forced_locale_changes_placeholder() {
    let options = Options { locale: Some(Locale::En), ..Options::default() };
    let info = extract_with_options(EPISODE_PAGE, "https://ogladajanime.pl/anime/frieren/12", &options);
    assert_eq!(info.mirror_links[1].description, "Episode link");
}

#[test]
fn subdomain_triggers_discovery() {
    let info = extract(EPISODE_PAGE, "https://www.ogladajanime.pl/anime/frieren/12");
    assert_eq!(info.mirror_links.len(), 3);
    assert_eq!(info.domain, "ogladajanime.pl");
}

#[test]
fn other_hosts_never_discover() {
    let info = extract(EPISODE_PAGE, "https://example.com/anime/frieren/12");
    assert!(info.mirror_links.is_empty());
    assert!(info.site.is_none());
    assert_eq!(info.title, "Frieren 12");
}

#[test]
fn anchor_fallback_reads_author_from_list_item() {
    let html = r#"
        <html><body>
          <ul>
            <li>Author: Alice <a href="https://mixdrop.co/e/m1">Mixdrop</a></li>
            <li><a href="https://example.org/e/skip">unknown host</a></li>
          </ul>
        </body></html>
    "#;

    let info = extract(html, "https://ogladajanime.pl/anime/x/1");
    assert_eq!(info.mirror_links.len(), 1);

    let link = &info.mirror_links[0];
    assert_eq!(link.url, "https://mixdrop.co/e/m1");
    assert_ne!(link.author, UNKNOWN_AUTHOR);
    assert!(link.author.contains("Alice"));
    assert_eq!(link.description, "Mixdrop");
}

#[test]
fn anchor_fallback_skipped_when_containers_found() {
    let html = r#"
        <html><body>
          <div class="mirror-links">
            <div class="mirror-link"><span class="mirror-author">Zed</span><a href="https://streamtape.com/e/1">st</a></div>
          </div>
          <ul><li>Alice <a href="https://mixdrop.co/e/m1">Mixdrop</a></li></ul>
        </body></html>
    "#;

    let info = extract(html, "https://ogladajanime.pl/anime/x/1");
    assert_eq!(info.mirror_links.len(), 1);
    assert_eq!(info.mirror_links[0].author, "Zed");
}

#[test]
fn anchor_fallback_dedupes_repeated_hosts() {
    let html = r#"
        <html><body><ul>
          <li>First <a href="https://voe.sx/e/1">voe</a></li>
          <li>Second <a href="https://voe.sx/e/1#t=10">voe</a></li>
          <li>Third <a href="https://dood.to/e/2">dood</a></li>
        </ul></body></html>
    "#;

    let info = extract(html, "https://ogladajanime.pl/anime/x/1");
    let authors: Vec<&str> = info.mirror_links.iter().map(|l| l.author.as_str()).collect();
    assert_eq!(authors, ["First", "Third"]);
}

#[test]
fn page_without_any_links_has_empty_list() {
    let info = extract("<h1 class=\"entry-title\">Odcinek</h1>", "https://ogladajanime.pl/x");
    assert!(info.mirror_links.is_empty());
    assert!(info.is_override_site());
    assert!(!info.has_mirror_links());
}

#[test]
fn override_title_keeps_episode_number() {
    let html = r#"<h1 class="entry-title">One Piece - 1071</h1>"#;
    let info = extract(html, "https://ogladajanime.pl/anime/one-piece/1071");
    assert_eq!(info.title, "One Piece - 1071");
}

#[test]
fn declared_title_keeps_numeric_episode_segment() {
    let info = extract("<title>Frieren - 12</title>", "https://ogladajanime.pl/anime/frieren/12");
    assert_eq!(info.title, "Frieren - 12");
}

#[test]
fn mirror_requests_carry_distinct_episode_titles() {
    let episode = |n: u32| {
        let html = format!(
            r#"<h1 class="entry-title">One Piece - {n}</h1>
               <div class="episode-links"><div class="link-container"><a href="https://voe.sx/e/{n}">voe</a></div></div>"#
        );
        let info = extract(&html, &format!("https://ogladajanime.pl/anime/one-piece/{n}"));
        vidinfo::DownloadRequest::from_mirror(&info, &info.mirror_links[0]).title
    };

    assert_eq!(episode(1070).as_deref(), Some("One Piece - 1070"));
    assert_eq!(episode(1071).as_deref(), Some("One Piece - 1071"));
}
