//! RSS 2.0 rendering of feed items.

use rss::{validation::Validate, Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use tracing::debug;

use super::FeedItem;
use crate::config::{BaseRef, SiteConfig};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("RSS validation failed: {0}")]
    Validation(#[from] rss::validation::ValidationError),
}

fn to_rss_item(item: &FeedItem) -> Item {
    ItemBuilder::default()
        .title(item.title.clone())
        .link(item.link.clone())
        .guid(
            GuidBuilder::default()
                .permalink(true)
                .value(item.link.clone())
                .build(),
        )
        .description(item.description.clone())
        .pub_date(item.pub_date.to_rfc2822())
        .build()
}

pub fn channel(config: &SiteConfig, base: &BaseRef, items: &[FeedItem]) -> Result<Channel, Error> {
    let channel = ChannelBuilder::default()
        .title(config.title.clone())
        .link(base.root())
        .description(config.description.clone())
        .generator(env!("CARGO_PKG_NAME").to_owned())
        .items(items.iter().map(to_rss_item).collect::<Vec<_>>())
        .build();

    channel.validate()?;

    Ok(channel)
}

pub fn render(config: &SiteConfig, base: &BaseRef, items: &[FeedItem]) -> Result<String, Error> {
    let xml = channel(config, base, items)?.to_string();
    debug!("Rendered feed with {} items ({} bytes)", items.len(), xml.len());
    Ok(xml)
}
