//! Rendering a content snapshot into page templates
//!
//! Two independent targets:
//! - the generic article container (`[data-content-key]`), rebuilt from
//!   escaped markup
//! - the home page slots, filled by id with plain text, sections matched by
//!   their `data-section-index`
//!
//! Anything missing on either side (data or element) is skipped and the
//! page keeps its pre-authored content.

use std::fmt;
use std::fmt::Write;

use super::dom::*;
use super::snapshot::ContentSnapshot;
use crate::content::models::{Article, Section};

/// Loader lifecycle; the only transition is `Unloaded` -> `Loaded`
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoaderState {
    #[default]
    Unloaded,
    Loaded(ContentSnapshot),
}

impl LoaderState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoaderState::Loaded(_))
    }

    pub fn snapshot(&self) -> Option<&ContentSnapshot> {
        match self {
            LoaderState::Loaded(snapshot) => Some(snapshot),
            LoaderState::Unloaded => None,
        }
    }
}

/// Apply the outcome of the one content fetch to the page
///
/// A failed fetch or an unparsable body leaves the page untouched and the
/// loader `Unloaded`; there is no retry.
pub fn load<D: Dom, E: fmt::Display>(fetched: Result<String, E>, dom: &mut D) -> LoaderState {
    let body = match fetched {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!("content fetch failed: {err}");
            return LoaderState::Unloaded;
        }
    };

    match ContentSnapshot::parse(&body) {
        Ok(snapshot) => {
            render(&snapshot, dom);
            LoaderState::Loaded(snapshot)
        }
        Err(err) => {
            tracing::debug!("ignoring content: {err}");
            LoaderState::Unloaded
        }
    }
}

pub fn render<D: Dom>(snapshot: &ContentSnapshot, dom: &mut D) {
    render_article(snapshot, dom);
    if let Some(home) = snapshot.home() {
        render_home(home, dom);
    }
}

/// Fill the `[data-content-key]` container; returns whether anything was rendered
pub fn render_article<D: Dom>(snapshot: &ContentSnapshot, dom: &mut D) -> bool {
    let Some(container) = dom.first_with_attribute(CONTENT_KEY_ATTR) else {
        return false;
    };
    let Some(key) = dom.attribute(&container, CONTENT_KEY_ATTR) else {
        return false;
    };
    let Some(article) = snapshot.article(key.trim()) else {
        return false;
    };

    dom.set_inner_html(&container, &article_html(article));
    true
}

/// Escape text for insertion into markup
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Markup for the generic article template
pub fn article_html(article: &Article) -> String {
    let mut html = String::new();

    if let Some(title) = present(&article.title) {
        let _ = write!(html, "<h1>{}</h1>", escape_html(title));
    }
    if let Some(intro) = present(&article.intro) {
        write_paragraphs(&mut html, intro);
    }
    for section in &article.sections {
        write_section(&mut html, section);
    }

    html
}

fn write_section(html: &mut String, section: &Section) {
    if let Some(heading) = present(&section.heading) {
        let _ = write!(html, "<h2>{}</h2>", escape_html(heading));
    }
    if let Some(quote) = present(&section.quote) {
        let _ = write!(html, "<blockquote>{}</blockquote>", escape_html(quote));
    }
    if let Some(body) = present(&section.body) {
        write_paragraphs(html, body);
    }
    let items: Vec<&str> = non_blank(&section.list).collect();
    if !items.is_empty() {
        html.push_str("<ul>");
        for item in items {
            let _ = write!(html, "<li>{}</li>", escape_html(item));
        }
        html.push_str("</ul>");
    }
}

/// Blank strings count as absent, as older stores wrote `""` for missing fields
fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|text| !text.trim().is_empty())
}

fn non_blank(items: &[String]) -> impl Iterator<Item = &str> {
    items
        .iter()
        .map(String::as_str)
        .filter(|item| !item.trim().is_empty())
}

/// One `<p>` per blank-line separated paragraph
fn write_paragraphs(html: &mut String, text: &str) {
    for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        let _ = write!(html, "<p>{}</p>", escape_html(paragraph));
    }
}

pub fn bullets_html(bullets: &[String]) -> String {
    non_blank(bullets)
        .map(|bullet| format!("<li class=\"home-bullet\">{}</li>", escape_html(bullet)))
        .collect()
}

/// Fill the home page slots that have both data and an element
pub fn render_home<D: Dom>(home: &Article, dom: &mut D) {
    set_text_by_id(dom, HOME_TITLE_ID, present(&home.title));
    set_text_by_id(dom, HOME_INTRO_ID, present(&home.intro));
    set_text_by_id(dom, HOME_IMAGE_CAPTION_ID, present(&home.image_caption));

    if non_blank(&home.bullets).next().is_some() {
        if let Some(container) = dom.element_by_id(HOME_BULLETS_ID) {
            dom.set_inner_html(&container, &bullets_html(&home.bullets));
        }
    }

    if !home.sections.is_empty() {
        if let Some(container) = dom.element_by_id(HOME_SECTIONS_ID) {
            render_home_sections(&home.sections, &container, dom);
        }
    }
}

fn set_text_by_id<D: Dom>(dom: &mut D, id: &str, text: Option<&str>) {
    let Some(text) = text else { return };
    if let Some(element) = dom.element_by_id(id) {
        dom.set_text(&element, text);
    }
}

fn render_home_sections<D: Dom>(sections: &[Section], container: &D::Element, dom: &mut D) {
    for slot in dom.descendants_with_attribute(container, SECTION_INDEX_ATTR) {
        let Some(section) = dom
            .attribute(&slot, SECTION_INDEX_ATTR)
            .and_then(|index| index.trim().parse::<usize>().ok())
            .and_then(|index| sections.get(index))
        else {
            continue;
        };

        set_slot_text(dom, &slot, SECTION_HEADING_ATTR, present(&section.heading));
        set_slot_text(dom, &slot, SECTION_BODY_ATTR, present(&section.body));
    }
}

fn set_slot_text<D: Dom>(dom: &mut D, slot: &D::Element, attribute: &str, text: Option<&str>) {
    let Some(text) = text else { return };
    if let Some(target) = dom.descendants_with_attribute(slot, attribute).into_iter().next() {
        dom.set_text(&target, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::testing::MemoryDom;

    const STORE: &str = r#"{
        "maps": {
            "title": "Maps & <Location>",
            "intro": "Where things are.",
            "sections": [
                {"heading": "Scale", "quote": "\"All maps lie\"", "body": "One.\n\nTwo.", "list": ["Small", "Large"]}
            ]
        },
        "home": {
            "title": "Arizona",
            "intro": "<b>Welcome</b>",
            "bullets": ["Canyons", "Deserts & Mesas"],
            "imageCaption": "Monument Valley",
            "sections": [{"heading": "A", "body": "a"}, {"heading": "B", "body": "b"}]
        }
    }"#;

    struct HomePage {
        dom: MemoryDom,
        title: usize,
        intro: usize,
        bullets: usize,
        caption: usize,
        sections: usize,
        headings: [usize; 2],
        bodies: [usize; 2],
    }

    fn home_page() -> HomePage {
        let mut dom = MemoryDom::new();
        let title = dom.add(None, Some(HOME_TITLE_ID), &[], "Static title");
        let intro = dom.add(None, Some(HOME_INTRO_ID), &[], "Static intro");
        let bullets = dom.add(None, Some(HOME_BULLETS_ID), &[], "<li>Static</li>");
        let caption = dom.add(None, Some(HOME_IMAGE_CAPTION_ID), &[], "Static caption");
        let sections = dom.add(None, Some(HOME_SECTIONS_ID), &[], "");

        let mut headings = [0; 2];
        let mut bodies = [0; 2];
        for (index, value) in ["0", "1"].iter().enumerate() {
            let slot = dom.add(Some(sections), None, &[(SECTION_INDEX_ATTR, value)], "");
            headings[index] = dom.add(Some(slot), None, &[(SECTION_HEADING_ATTR, "")], "h");
            bodies[index] = dom.add(Some(slot), None, &[(SECTION_BODY_ATTR, "")], "b");
        }

        HomePage {
            dom,
            title,
            intro,
            bullets,
            caption,
            sections,
            headings,
            bodies,
        }
    }

    fn slot_contents(page: &HomePage) -> Vec<String> {
        [page.title, page.intro, page.bullets, page.caption, page.sections]
            .iter()
            .map(|&element| page.dom.content(element).to_string())
            .collect()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_article_html_escapes_every_field() {
        let hostile = "<script>alert('x') & \"y\"</script>";
        let article = Article {
            title: Some(hostile.to_string()),
            intro: Some(hostile.to_string()),
            sections: vec![Section {
                heading: Some(hostile.to_string()),
                body: Some(hostile.to_string()),
                quote: Some(hostile.to_string()),
                list: vec![hostile.to_string()],
            }],
            ..Article::default()
        };

        let html = article_html(&article);
        assert!(!html.contains("<script"));
        assert!(!html.contains("'x'"));
        assert_eq!(
            html.matches("&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;")
                .count(),
            6
        );
    }

    #[test]
    fn test_article_html_layout() {
        let snapshot = ContentSnapshot::parse(STORE).unwrap();
        let html = article_html(snapshot.article("maps").unwrap());
        assert_eq!(
            html,
            "<h1>Maps &amp; &lt;Location&gt;</h1>\
             <p>Where things are.</p>\
             <h2>Scale</h2>\
             <blockquote>&quot;All maps lie&quot;</blockquote>\
             <p>One.</p><p>Two.</p>\
             <ul><li>Small</li><li>Large</li></ul>"
        );
    }

    #[test]
    fn test_title_only_article_renders_only_heading() {
        let article = Article {
            title: Some("Fluvial".to_string()),
            ..Article::default()
        };
        assert_eq!(article_html(&article), "<h1>Fluvial</h1>");

        let empty_section = Article {
            title: Some("Fluvial".to_string()),
            sections: vec![Section::default()],
            ..Article::default()
        };
        assert_eq!(article_html(&empty_section), "<h1>Fluvial</h1>");
    }

    #[test]
    fn test_blank_fields_render_as_absent() {
        let snapshot = ContentSnapshot::parse(
            r#"{"maps": {"title": "", "intro": " ", "sections": [
                {"heading": "", "body": "Kept.", "quote": "", "list": ["", "Small"]},
                {"heading": "", "body": ""}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(
            article_html(snapshot.article("maps").unwrap()),
            "<p>Kept.</p><ul><li>Small</li></ul>"
        );
    }

    #[test]
    fn test_blank_home_fields_leave_slots_untouched() {
        let mut page = home_page();
        let home = Article {
            title: Some(String::new()),
            intro: Some("Fresh intro".to_string()),
            bullets: vec![String::new()],
            image_caption: Some("  ".to_string()),
            sections: vec![Section {
                heading: Some(String::new()),
                body: Some("Fresh body".to_string()),
                ..Section::default()
            }],
        };
        render_home(&home, &mut page.dom);

        assert_eq!(page.dom.content(page.title), "Static title");
        assert_eq!(page.dom.content(page.intro), "Fresh intro");
        assert_eq!(page.dom.content(page.bullets), "<li>Static</li>");
        assert_eq!(page.dom.content(page.caption), "Static caption");
        assert_eq!(page.dom.content(page.headings[0]), "h");
        assert_eq!(page.dom.content(page.bodies[0]), "Fresh body");
    }

    #[test]
    fn test_render_article_into_marked_container() {
        let snapshot = ContentSnapshot::parse(STORE).unwrap();
        let mut dom = MemoryDom::new();
        let main = dom.add(None, None, &[(CONTENT_KEY_ATTR, "maps")], "fallback");

        assert!(render_article(&snapshot, &mut dom));
        assert!(dom.is_markup(main));
        assert!(dom.content(main).starts_with("<h1>Maps &amp;"));
    }

    #[test]
    fn test_unknown_key_leaves_container_alone() {
        let snapshot = ContentSnapshot::parse(STORE).unwrap();
        let mut dom = MemoryDom::new();
        let main = dom.add(None, None, &[(CONTENT_KEY_ATTR, "glossary")], "fallback");

        assert!(!render_article(&snapshot, &mut dom));
        assert_eq!(dom.content(main), "fallback");
    }

    #[test]
    fn test_home_render_fills_slots() {
        let snapshot = ContentSnapshot::parse(STORE).unwrap();
        let mut page = home_page();
        render(&snapshot, &mut page.dom);

        let dom = &page.dom;
        assert_eq!(dom.content(page.title), "Arizona");
        // Assigned as text, not markup
        assert_eq!(dom.content(page.intro), "<b>Welcome</b>");
        assert!(!dom.is_markup(page.intro));
        assert_eq!(
            dom.content(page.bullets),
            "<li class=\"home-bullet\">Canyons</li><li class=\"home-bullet\">Deserts &amp; Mesas</li>"
        );
        assert_eq!(dom.content(page.caption), "Monument Valley");
    }

    #[test]
    fn test_home_sections_match_by_index() {
        let snapshot = ContentSnapshot::parse(STORE).unwrap();
        let mut page = home_page();
        render(&snapshot, &mut page.dom);

        assert_eq!(page.dom.content(page.headings[0]), "A");
        assert_eq!(page.dom.content(page.bodies[0]), "a");
        assert_eq!(page.dom.content(page.headings[1]), "B");
        assert_eq!(page.dom.content(page.bodies[1]), "b");
    }

    #[test]
    fn test_home_sections_out_of_range_or_bad_index_untouched() {
        let mut dom = MemoryDom::new();
        let container = dom.add(None, Some(HOME_SECTIONS_ID), &[], "");
        let far = dom.add(Some(container), None, &[(SECTION_INDEX_ATTR, "5")], "");
        let far_heading = dom.add(Some(far), None, &[(SECTION_HEADING_ATTR, "")], "keep");
        let bad = dom.add(Some(container), None, &[(SECTION_INDEX_ATTR, "-1")], "");
        let bad_heading = dom.add(Some(bad), None, &[(SECTION_HEADING_ATTR, "")], "keep");

        let home = Article {
            sections: vec![Section::with_heading("Only")],
            ..Article::default()
        };
        render_home(&home, &mut dom);

        assert_eq!(dom.content(far_heading), "keep");
        assert_eq!(dom.content(bad_heading), "keep");
    }

    #[test]
    fn test_home_render_is_idempotent() {
        let snapshot = ContentSnapshot::parse(STORE).unwrap();
        let home = snapshot.home().unwrap();

        let mut once = home_page();
        render_home(home, &mut once.dom);
        let mut twice = home_page();
        render_home(home, &mut twice.dom);
        render_home(home, &mut twice.dom);

        assert_eq!(slot_contents(&once), slot_contents(&twice));
        for index in 0..2 {
            assert_eq!(
                once.dom.content(once.headings[index]),
                twice.dom.content(twice.headings[index])
            );
            assert_eq!(
                once.dom.content(once.bodies[index]),
                twice.dom.content(twice.bodies[index])
            );
        }
    }

    #[test]
    fn test_missing_home_fields_leave_slots_untouched() {
        let mut page = home_page();
        let home = Article {
            title: Some("Only the title".to_string()),
            ..Article::default()
        };
        render_home(&home, &mut page.dom);

        assert_eq!(page.dom.content(page.title), "Only the title");
        assert_eq!(page.dom.content(page.intro), "Static intro");
        assert_eq!(page.dom.content(page.bullets), "<li>Static</li>");
        assert_eq!(page.dom.content(page.caption), "Static caption");
        assert_eq!(page.dom.content(page.headings[0]), "h");
    }

    #[test]
    fn test_fetch_failure_keeps_static_content() {
        let mut page = home_page();
        let before = slot_contents(&page);

        let state = load(Err::<String, _>("network unreachable"), &mut page.dom);

        assert_eq!(state, LoaderState::Unloaded);
        assert_eq!(slot_contents(&page), before);
    }

    #[test]
    fn test_malformed_json_keeps_static_content() {
        let mut page = home_page();
        let before = slot_contents(&page);

        let state = load(Ok::<_, String>("{\"home\": ".to_string()), &mut page.dom);

        assert!(!state.is_loaded());
        assert_eq!(slot_contents(&page), before);
    }

    #[test]
    fn test_successful_load_returns_snapshot() {
        let mut page = home_page();
        let state = load(Ok::<_, String>(STORE.to_string()), &mut page.dom);

        assert!(state.is_loaded());
        assert_eq!(state.snapshot().unwrap().len(), 2);
        assert_eq!(page.dom.content(page.title), "Arizona");
    }
}
