use crate::crawler::{Document, Fetcher, Query};
use crate::model::Owner;
use regex::Regex;
use std::sync::LazyLock;

static ACCOUNT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"accountId:\s*(\d+)").expect("valid regex"));
static USER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"userId:\s*(\d+)").expect("valid regex"));

/// Numeric ids embedded in a profile page's inline script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileIds {
    pub account_id: Option<u64>,
    pub user_id: Option<u64>,
}

/// Scans inline scripts for `accountId:` / `userId:` tokens
///
/// Only the first script mentioning `accountId` is read; the scan stops there.
pub fn parse_profile_ids(doc: &Document) -> ProfileIds {
    for script in doc.select_all("script") {
        let body = script.html();
        if !body.contains("accountId") {
            continue;
        }

        let capture = |re: &Regex| {
            re.captures(&body)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
        };

        return ProfileIds {
            account_id: capture(&ACCOUNT_ID),
            user_id: capture(&USER_ID),
        };
    }

    ProfileIds::default()
}

/// Fills `account_id` (and `user_id` if still unknown) from the owner's profile page
///
/// Owners without a profile link are left alone, and so is everything when the
/// profile fetch fails.
pub async fn resolve_owner_ids<F: Fetcher>(fetcher: &F, owner: &mut Owner) {
    let Some(link) = owner.link.clone() else {
        return;
    };

    let doc = match fetcher.fetch(&link).await {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("Skipping profile ids for {}: {}", link, e);
            return;
        }
    };

    let ids = parse_profile_ids(&doc);
    if ids.account_id.is_some() {
        owner.account_id = ids.account_id;
    }
    if owner.user_id.is_none() {
        owner.user_id = ids.user_id;
    }
}
