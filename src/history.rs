//! History summarization.
//!
//! Boolean/timestamp milestones derived from the classified, status-stamped
//! action sequence. Recomputed from scratch on every run; never persisted
//! incrementally.

use crate::types::{ActionType, Chamber, ClassifiedAction, History, VoteType};

/// Text marking introductory remarks, which do not activate a bill
const INTRO_REMARKS_PREFIX: &str = "Sponsor introductory remarks";

/// The first action that represents substantive movement, if any
///
/// A bill that has only been introduced, referred, and calendared is not
/// active. When the sequence opens with that routine (or untyped) activity,
/// the activation point is the first subsequent action that is neither
/// referral nor calendar nor an introductory-remarks entry. Any other
/// opening action is itself the activation point.
fn activation_point(actions: &[ClassifiedAction]) -> Option<&ClassifiedAction> {
    let first = actions.first()?;
    match first.action_type {
        ActionType::Referral | ActionType::Calendar | ActionType::Action => {
            actions[1..].iter().find(|action| {
                !matches!(action.action_type, ActionType::Referral | ActionType::Calendar)
                    && !action.text.starts_with(INTRO_REMARKS_PREFIX)
            })
        }
        _ => Some(first),
    }
}

/// Latest passage vote in a chamber (overrides excluded)
fn latest_passage<'a>(
    actions: &'a [ClassifiedAction],
    chamber: Chamber,
) -> Option<&'a ClassifiedAction> {
    actions.iter().rev().find(|action| {
        action.action_type == ActionType::Vote
            && action.chamber == Some(chamber)
            && action.vote_type != Some(VoteType::Override)
    })
}

/// Latest override vote in a chamber
fn latest_override<'a>(
    actions: &'a [ClassifiedAction],
    chamber: Chamber,
) -> Option<&'a ClassifiedAction> {
    actions.iter().rev().find(|action| {
        action.action_type == ActionType::Vote
            && action.chamber == Some(chamber)
            && action.vote_type == Some(VoteType::Override)
    })
}

/// Derive the history summary from the chronological classified sequence
pub fn summarize(actions: &[ClassifiedAction]) -> History {
    let mut history = History::default();

    if let Some(activation) = activation_point(actions) {
        history.active = true;
        history.active_at = Some(activation.acted_at.clone());
    }

    if let Some(vote) = latest_passage(actions, Chamber::House) {
        history.house_passage_result = vote.result;
        history.house_passage_result_at = Some(vote.acted_at.clone());
    }
    if let Some(vote) = latest_passage(actions, Chamber::Senate) {
        history.senate_passage_result = vote.result;
        history.senate_passage_result_at = Some(vote.acted_at.clone());
    }

    if let Some(cloture) = actions.iter().rev().find(|action| {
        action.action_type == ActionType::VoteAux
            && action.vote_type == Some(VoteType::Cloture)
            && action.chamber == Some(Chamber::Senate)
    }) {
        history.senate_cloture_result = cloture.result;
        history.senate_cloture_result_at = Some(cloture.acted_at.clone());
    }

    if let Some(veto) = actions
        .iter()
        .find(|action| action.action_type == ActionType::Vetoed)
    {
        history.vetoed = true;
        history.vetoed_at = Some(veto.acted_at.clone());
    }

    if let Some(vote) = latest_override(actions, Chamber::House) {
        history.house_override_result = vote.result;
        history.house_override_result_at = Some(vote.acted_at.clone());
    }
    if let Some(vote) = latest_override(actions, Chamber::Senate) {
        history.senate_override_result = vote.result;
        history.senate_override_result_at = Some(vote.acted_at.clone());
    }

    if let Some(enacted) = actions
        .iter()
        .find(|action| action.action_type == ActionType::Enacted)
    {
        history.enacted = true;
        history.enacted_at = Some(enacted.acted_at.clone());
    }

    if !history.vetoed && !history.enacted {
        if let Some(presented) = actions
            .iter()
            .find(|action| action.action_type == ActionType::ToPresident)
        {
            history.awaiting_signature = true;
            history.awaiting_signature_since = Some(presented.acted_at.clone());
        }
    }

    history
}
