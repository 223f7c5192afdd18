use camino::Utf8Path;
use serde::Serialize;
use tracing::info;

use crate::{
    config::{BaseRef, SiteConfig},
    feed,
    post::Post,
    tags,
};

pub const FEED_FILE: &str = "feed.xml";
pub const TAGS_FILE: &str = "tags.json";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Feed(#[from] feed::rss::Error),
    #[error("Failed to serialize tag index: {0}")]
    Json(#[from] serde_json::Error),
}

/// One entry of the tag index: a tag and the slugs of the posts carrying it.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TagEntry<'a> {
    pub tag: String,
    pub posts: Vec<&'a str>,
}

#[must_use]
pub fn tag_index(posts: &[Post]) -> Vec<TagEntry<'_>> {
    tags::collate(posts)
        .into_iter()
        .map(|tag| {
            let posts = tags::filter(posts, &tag)
                .into_iter()
                .map(|post| post.slug.as_str())
                .collect();
            TagEntry { tag, posts }
        })
        .collect()
}

pub fn feed_xml(posts: &[Post], config: &SiteConfig, base: &BaseRef) -> Result<String, Error> {
    let items = feed::project(posts, base);
    let xml = feed::rss::render(config, base, &items)?;
    Ok(xml)
}

/// Writes the feed and the tag index into `out_dir`, creating it if needed.
pub fn write(
    out_dir: &Utf8Path,
    posts: &[Post],
    config: &SiteConfig,
    base: &BaseRef,
) -> Result<(), Error> {
    std::fs::create_dir_all(out_dir)?;

    let feed_path = out_dir.join(FEED_FILE);
    std::fs::write(&feed_path, feed_xml(posts, config, base)?)?;
    info!("Wrote {feed_path}");

    let tags_path = out_dir.join(TAGS_FILE);
    std::fs::write(&tags_path, serde_json::to_string_pretty(&tag_index(posts))?)?;
    info!("Wrote {tags_path}");

    Ok(())
}

#[cfg(test)]
mod test {
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;

    use super::TagEntry;
    use crate::{
        config::{Mode, SiteConfig},
        tags::test::post,
    };

    #[test]
    fn tag_index() {
        let posts = vec![
            post("A", "a", (2024, 1, 3), Some(&["x", "y"])),
            post("B", "b", (2024, 1, 2), None),
            post("C", "c", (2024, 1, 1), Some(&["x"])),
        ];

        assert_eq!(
            vec![
                TagEntry {
                    tag: "x".to_owned(),
                    posts: vec!["a", "c"]
                },
                TagEntry {
                    tag: "y".to_owned(),
                    posts: vec!["a"]
                },
            ],
            super::tag_index(&posts)
        );
        assert!(super::tag_index(&[]).is_empty());
    }

    #[test]
    fn write() {
        let out_dir = Utf8PathBuf::try_from(std::env::temp_dir())
            .unwrap()
            .join(format!("jotter-site-{}", std::process::id()))
            .join("public");
        let config = SiteConfig::default();
        let posts = vec![post("A", "a", (2024, 1, 3), Some(&["x"]))];

        super::write(
            &out_dir,
            &posts,
            &config,
            &config.base_ref(Mode::Production),
        )
        .unwrap();

        let feed = std::fs::read_to_string(out_dir.join(super::FEED_FILE)).unwrap();
        assert!(feed.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(feed.contains("<link>https://ggliv.com/blog/a</link>"));

        let tags: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out_dir.join(super::TAGS_FILE)).unwrap())
                .unwrap();
        assert_eq!(serde_json::json!([{ "tag": "x", "posts": ["a"] }]), tags);

        std::fs::remove_dir_all(out_dir.parent().unwrap()).unwrap();
    }
}
