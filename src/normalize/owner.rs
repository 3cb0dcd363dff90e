use crate::model::UserType;

/// Markers observed around a post's owner block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerSignals {
    /// An owner block exists at all
    pub block_present: bool,
    /// A moderator badge or flair is shown
    pub moderator: bool,
    /// A new-contributor indicator is shown
    pub new_contributor: bool,
    /// An explicit "Unregistered" badge is shown
    pub unregistered_badge: bool,
    /// The block links to a user profile
    pub has_user_link: bool,
}

/// Classifies an owner from its markers
///
/// Precedence: no block → `DoesNotExist`, then moderator, then new
/// contributor, then registered when a profile link exists (and no
/// unregistered badge says otherwise), else unregistered.
pub fn classify_owner(signals: &OwnerSignals) -> UserType {
    if !signals.block_present {
        UserType::DoesNotExist
    } else if signals.moderator {
        UserType::Moderator
    } else if signals.new_contributor {
        UserType::NewContributor
    } else if signals.has_user_link && !signals.unregistered_badge {
        UserType::Registered
    } else {
        UserType::Unregistered
    }
}
