//! Collectives: listing cards, paginated tag tabs and external links

use crate::config::CrawlerConfig;
use crate::crawler::{Document, Element, Fetcher, PageYield, Paginator, Politeness, Query};
use crate::extract::{Extraction, Misses};
use crate::model::{Collective, ExternalLink, LinkType};
use crate::site::{last_segment, Site};

/// Class set of one collective card on `/collectives-all`
const CARD_CLASSES: &[&str] = &["flex--item", "s-card", "bs-sm", "mb12", "py16", "fc-black-500"];

const NO_NAME: &str = "No name found";
const NO_DESCRIPTION: &str = "No description found";
const NO_SLUG: &str = "No slug found";

/// A collective as shown on the listing, before its own page is visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectiveCard {
    pub name: String,
    /// The href exactly as it appears on the card
    pub link: String,
    /// Absolute URL of the collective page, if the href resolves
    pub url: Option<String>,
    pub description: String,
    pub slug: String,
}

/// Reads every collective card on the listing page
pub fn parse_collective_cards(doc: &Document, site: &Site) -> Extraction<CollectiveCard> {
    let cards = doc.find_all("div", CARD_CLASSES);
    let mut misses = Misses::new();

    let records = cards
        .iter()
        .enumerate()
        .map(|(index, card)| {
            misses.at(index);
            parse_card(*card, site, &mut misses)
        })
        .collect();

    Extraction::new(cards.len(), records, misses)
}

fn parse_card(card: Element<'_>, site: &Site, misses: &mut Misses) -> CollectiveCard {
    let anchor = card.select_one("a.js-gps-track");
    let href = anchor.and_then(|a| a.attr_nonempty("href"));

    let name = anchor.map(|a| a.text()).filter(|n| !n.is_empty());
    let description = card
        .select_one("span.fs-body1.v-truncate2.ow-break-word")
        .map(|span| span.text())
        .filter(|d| !d.is_empty());

    CollectiveCard {
        name: misses.or_default("name", name, NO_NAME.to_string()),
        link: href.unwrap_or_default().to_string(),
        url: href.and_then(|h| site.resolve(h)),
        description: misses.or_default("description", description, NO_DESCRIPTION.to_string()),
        slug: misses.or_default(
            "slug",
            href.and_then(last_segment).map(str::to_string),
            NO_SLUG.to_string(),
        ),
    }
}

/// Tag names on one page of a collective's tag tab
pub fn parse_tag_page(doc: &Document) -> PageYield<String> {
    PageYield::all(
        doc.select_all("a.s-tag.post-tag")
            .iter()
            .map(|tag| tag.text())
            .collect(),
    )
}

/// External links from the collective page's dropdown
///
/// Options are typed by position against [`LinkType::VOCABULARY`]; options past
/// the vocabulary are ignored and options with an empty `data-url` dropped.
pub fn parse_external_links(doc: &Document) -> Vec<ExternalLink> {
    let options = doc.select_all("div.s-select optgroup[label='External links'] option");

    LinkType::VOCABULARY
        .iter()
        .zip(options)
        .filter_map(|(kind, option)| {
            option.attr_nonempty("data-url").map(|url| ExternalLink {
                kind: *kind,
                link: url.to_string(),
            })
        })
        .collect()
}

/// Builds every collective on the listing page
///
/// Each collective costs one paginated tag crawl and one page fetch for its
/// external links, all serial. Either may fail without dropping the
/// collective: a truncated tag crawl keeps the tags it found and a failed
/// link fetch leaves `external_links` empty. The politeness delay separates
/// consecutive collectives.
pub async fn extract_collectives<F: Fetcher, P: Politeness>(
    fetcher: &F,
    politeness: &P,
    site: &Site,
    doc: &Document,
    crawler: &CrawlerConfig,
) -> Vec<Collective> {
    let cards = parse_collective_cards(doc, site);
    cards.log_summary("collectives");

    let paginator = Paginator::new(fetcher, politeness, crawler.max_pages);
    let mut collectives = Vec::with_capacity(cards.records.len());

    for (index, card) in cards.records.into_iter().enumerate() {
        if index > 0 {
            politeness.pause().await;
        }

        let (tags, external_links) = match &card.url {
            Some(url) => {
                let outcome = paginator
                    .crawl(
                        |page| site.collective_tags_url(url, page, crawler.tag_page_size),
                        parse_tag_page,
                    )
                    .await;
                tracing::debug!(
                    "Collective {}: {} tag(s) over {} page(s)",
                    card.name,
                    outcome.records.len(),
                    outcome.pages_fetched
                );

                let links = match fetcher.fetch(url).await {
                    Ok(page) => parse_external_links(&page),
                    Err(e) => {
                        tracing::warn!("External links unavailable for {}: {}", url, e);
                        Vec::new()
                    }
                };
                (outcome.records, links)
            }
            None => {
                tracing::debug!("Collective {} has no link to follow", card.name);
                (Vec::new(), Vec::new())
            }
        };

        collectives.push(Collective {
            name: card.name,
            link: card.link,
            description: card.description,
            slug: card.slug,
            tags,
            external_links,
        });
    }

    collectives
}
