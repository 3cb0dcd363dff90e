//! Owner blocks in their two markup generations: listing user cards and
//! detail-page user-info signatures

use crate::crawler::{Element, Query};
use crate::extract::Misses;
use crate::model::Owner;
use crate::normalize::{classify_owner, normalize_reputation, OwnerSignals};
use crate::site::{last_segment, numeric_segment_after, Site};

/// Shown when an owner block has no usable name
const ANONYMOUS: &str = "Anonymous";

/// Owner from a listing summary's `s-user-card`
///
/// Listing cards carry partial information: reputation defaults to "0" and
/// the type is registered unless a badge says otherwise.
pub fn listing_owner(summary: Element<'_>, site: &Site, misses: &mut Misses) -> Owner {
    let Some(card) = summary.find_first("div", &["s-user-card"]) else {
        misses.absent("owner");
        return Owner::does_not_exist();
    };

    let user_link = card
        .select_one(".s-user-card--link a")
        .or_else(|| card.select_one("a[href*='/users/']"));
    let href = user_link.and_then(|a| a.attr_nonempty("href"));

    let badge = card
        .select_one(".s-badge")
        .map(|b| b.text().to_lowercase())
        .unwrap_or_default();

    let signals = OwnerSignals {
        block_present: true,
        moderator: badge.contains("moderator") || card.select_one(".mod-flair").is_some(),
        new_contributor: badge.contains("new contributor")
            || card.select_one(".new-contributor-indicator").is_some(),
        unregistered_badge: badge.contains("unregistered"),
        has_user_link: href.is_some_and(|h| h.contains("/users/")),
    };

    let display_name = user_link
        .map(|a| a.text())
        .filter(|name| !name.is_empty())
        .or_else(|| href.and_then(last_segment).map(str::to_string))
        .or_else(|| {
            card.select_one(".s-user-card--link")
                .map(|e| e.text())
                .filter(|name| !name.is_empty())
        });

    let reputation_el = card
        .select_one("[title^='reputation score']")
        .or_else(|| card.select_one(".s-user-card--rep"));
    if reputation_el.is_none() {
        misses.absent("owner.reputation");
    }

    Owner {
        user_id: href.and_then(|h| numeric_segment_after(h, "users")),
        account_id: None,
        user_type: classify_owner(&signals),
        display_name: misses.or_default("owner.display_name", display_name, ANONYMOUS.to_string()),
        profile_image: card
            .select_one("img.s-avatar--image")
            .and_then(|img| img.attr_nonempty("src"))
            .map(str::to_string),
        link: href.and_then(|h| site.resolve(h)),
        reputation: normalize_reputation(
            reputation_el.and_then(|e| e.attr("title")),
            reputation_el.map(|e| e.text()).as_deref(),
            "0",
        ),
    }
}

/// Owner from a detail-page post's `user-info` signature
///
/// `post` is the question or answer block. An explicit owner signature wins;
/// otherwise the last signature in the right column is the author, since
/// editor signatures come first. Badges are read from the signature markup
/// (`mod-flair`, `new-contributor-indicator`); reputation defaults to "1".
pub fn detail_owner(post: Element<'_>, site: &Site, misses: &mut Misses) -> Owner {
    let info = post
        .select_one(".post-layout--right .post-signature.owner .user-info")
        .or_else(|| post.select_all(".post-layout--right .user-info").pop());
    let Some(info) = info else {
        misses.absent("owner");
        return Owner::does_not_exist();
    };

    let user_link = info
        .select_one(".user-details a")
        .or_else(|| info.select_one("a[href*='/users/']"));
    let href = user_link.and_then(|a| a.attr_nonempty("href"));
    let markup = info.html();

    let signals = OwnerSignals {
        block_present: true,
        moderator: markup.contains("mod-flair"),
        new_contributor: markup.contains("new-contributor-indicator"),
        unregistered_badge: false,
        has_user_link: href.is_some_and(|h| h.contains("/users/")),
    };

    let display_name = info
        .select_one(".user-details a")
        .map(|a| a.text())
        .filter(|name| !name.is_empty())
        .or_else(|| {
            info.select_one(".user-details")
                .and_then(|d| d.text().split_whitespace().next().map(str::to_string))
        });

    let reputation_el = info.select_one("span.reputation-score");
    if reputation_el.is_none() {
        misses.absent("owner.reputation");
    }

    Owner {
        user_id: href.and_then(|h| numeric_segment_after(h, "users")),
        account_id: None,
        user_type: classify_owner(&signals),
        display_name: misses.or_default("owner.display_name", display_name, ANONYMOUS.to_string()),
        profile_image: info
            .select_one("img")
            .and_then(|img| img.attr_nonempty("src"))
            .map(str::to_string),
        link: href.and_then(|h| site.resolve(h)),
        reputation: normalize_reputation(
            reputation_el.and_then(|e| e.attr("title")),
            reputation_el.map(|e| e.text()).as_deref(),
            "1",
        ),
    }
}
