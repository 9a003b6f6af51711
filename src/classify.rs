//! Legislative action classification.
//!
//! Each chronological action is run through a fixed, ordered cascade of
//! pattern rules. The cascade never short-circuits: every rule is evaluated
//! and each returns an optional partial update, folded onto the action in
//! rule order so a later rule overwrites the overlapping fields of an
//! earlier one. Vote rules feed the status state machine (`crate::status`);
//! the replay over the whole sequence produces per-action status stamps and
//! the final status.
//!
//! The patterns encode several decades of floor-action phrasing from both
//! chambers. They are ordered and grouped the way the procedures themselves
//! are: House passage family, House special-rule passage, motions to table,
//! Senate passage family, then the committee/executive lifecycle.

use regex::Regex;

use crate::error::Result;
use crate::status::{status_after_enacted, status_after_vote, BillStatus, VoteOutcome};
use crate::types::{
    ActedAt, ActionType, BillType, Chamber, ClassifiedAction, LawCitation, LawKind, RawAction,
    VoteResult, VoteType,
};

/// Per-bill inputs the rules need besides the action text
#[derive(Debug, Clone, Copy)]
pub struct BillContext<'a> {
    pub bill_type: BillType,
    pub official_title: Option<&'a str>,
}

/// Result of replaying the full chronological action sequence
#[derive(Debug, Clone)]
pub struct ClassifiedActions {
    pub actions: Vec<ClassifiedAction>,
    pub status: BillStatus,
    /// Acted-at of the last action that changed the status
    pub status_at: Option<ActedAt>,
}

/// One rule's partial update; `None` fields leave the action untouched
#[derive(Debug, Default, Clone)]
struct ActionUpdate {
    action_type: Option<ActionType>,
    status: Option<BillStatus>,
    vote_type: Option<VoteType>,
    chamber: Option<Chamber>,
    how: Option<String>,
    result: Option<VoteResult>,
    roll: Option<String>,
    suspension: Option<bool>,
    as_amended: Option<bool>,
    committee: Option<String>,
    law: Option<LawCitation>,
}

impl ActionUpdate {
    fn apply(self, action: &mut ClassifiedAction) {
        if let Some(v) = self.action_type {
            action.action_type = v;
        }
        if let Some(v) = self.status {
            action.status = Some(v);
        }
        if let Some(v) = self.vote_type {
            action.vote_type = Some(v);
        }
        if let Some(v) = self.chamber {
            action.chamber = Some(v);
        }
        if let Some(v) = self.how {
            action.how = Some(v);
        }
        if let Some(v) = self.result {
            action.result = Some(v);
        }
        if let Some(v) = self.roll {
            action.roll = Some(v);
        }
        if let Some(v) = self.suspension {
            action.suspension = Some(v);
        }
        if let Some(v) = self.as_amended {
            action.as_amended = Some(v);
        }
        if let Some(v) = self.committee {
            action.committee = Some(v);
        }
        if let Some(v) = self.law {
            action.law = Some(v);
        }
    }
}

/// Compiled rule cascade
pub struct ActionParser {
    house_vote: Regex,
    house_special_rule: Regex,
    house_table: Regex,
    senate_vote: Regex,
    calendar: Regex,
    committee_report: Regex,
    senate_report_93: Regex,
    hearings: Regex,
    discharged: Regex,
    to_president: Regex,
    signed: Regex,
    pocket_vetoed: Regex,
    vetoed: Regex,
    ten_day_rule: Regex,
    enacted: Regex,
    referral: Regex,
    roll_number: Regex,
}

impl ActionParser {
    pub fn new() -> Result<Self> {
        let house_motion = "On passage\
            |On motion to suspend the rules and (?:pass the bill|pass the resolution|pass the joint resolution|agree to the resolution|agree to the conference report)\
            |On agreeing to the (?:resolution|conference report)\
            |Two-thirds of the Members present having voted in the affirmative the bill is passed\
            |On motion that the House (?:suspend the rules and )?(?:agree(?: with an amendment)? to|concur in) the Senate amendments?\
            |On motion that the House suspend the rules and pass the bill with the Senate amendments?\
            |House Agreed to Senate Amendments?\
            |Passed House";
        let house_how = "by voice vote\
            |without objection\
            |by (?:the Yeas and Nays|Yea-Nay Vote|recorded vote)(?::? \\(2/3 required\\))?: (?:\\d+ ?- ?\\d+(?:, \\d+ Present)? ?)?\\((?:Roll no\\.|Record Vote No:) ?\\d+\\)";

        let senate_motion = "Passed Senate\
            |Failed of passage in Senate\
            |Disagreed to in Senate\
            |Resolution agreed to in Senate\
            |Received in the Senate, read twice, considered, read the third time, and passed\
            |Received in the Senate, considered, and (?:agreed to|passed)\
            |Senate agreed to conference report\
            |Senate (?:agreed to|concurred in) (?:the )?House amendments?\
            |Senate receded from its amendments? and concurred\
            |Cloture(?: motion)?(?: on the (?:motion to proceed|bill|measure))?(?: to the (?:bill|measure))? (?:not )?invoked in Senate";
        let senate_how = ",? (?:without objection\
            |by Unanimous Consent\
            |by voice vote\
            |by Yea-Nay(?: Vote)?\\. ?\\d+ ?- ?\\d+\\.? Record Vote (?:No|Number): ?\\d+)";

        Ok(Self {
            house_vote: Regex::new(&format!(
                "(?i)(?P<motion>{house_motion})\
                 (?P<override>,? the objections of the President to the contrary notwithstanding\\.?)?\
                 (?P<amended>, as amended| \\(Amended\\))?\
                 ,? ?(?P<result>Passed|Failed|Agreed to|Rejected)?\
                 ,? ?(?P<how>{house_how})?"
            ))?,
            house_special_rule: Regex::new(
                "(?i)(?P<motion>Passed House|House agreed to Senate amendments?\
                 (?P<amended> with (?:an )?amendment)?) pursuant to",
            )?,
            house_table: Regex::new(&format!(
                "(?i)On motion to table the (?:bill|measure|resolution) Agreed to\
                 ,? ?(?P<how>{house_how})?"
            ))?,
            senate_vote: Regex::new(&format!(
                "(?i)(?P<motion>{senate_motion})\
                 (?P<override> over veto)?\
                 (?P<amended>,? (?:as amended|with an amendment))?\
                 (?P<how>{senate_how})?"
            ))?,
            calendar: Regex::new(
                "(?i)Placed on (?:the )?[\\w ]+? Calendar(?: under [\\w ]+?)?[,.] Calendar No\\. \\d+\\.\
                 |Committee Agreed to Seek Consideration Under Suspension of the Rules\
                 |Ordered to be Reported",
            )?,
            committee_report: Regex::new("(?i)Committee on (?P<committee>[^.]+)\\. Reported by")?,
            senate_report_93: Regex::new(
                "(?i)Reported to Senate from the (?P<committee>.+?)(?: \\(without written report\\))?\\.",
            )?,
            hearings: Regex::new("(?i)Committee on (?P<committee>[^.]+)\\. Hearings held")?,
            discharged: Regex::new("(?i)Committee on (?P<committee>[^.]+?)\\.? discharged")?,
            to_president: Regex::new("(?i)Cleared for White House|Presented to President")?,
            signed: Regex::new("(?i)Signed by President")?,
            pocket_vetoed: Regex::new("(?i)Pocket Vetoed by President")?,
            vetoed: Regex::new("(?i)Vetoed by President")?,
            ten_day_rule: Regex::new("(?i)Sent to Archivist of the United States unsigned")?,
            enacted: Regex::new(
                "(?i)Became (?P<kind>Public|Private) Law No: (?P<congress>\\d+)-(?P<number>\\d+)\\.",
            )?,
            referral: Regex::new(
                "(?i)Referred to (?:the )?(?:(?:House|Senate) )?(?:Committee|Subcommittee)",
            )?,
            roll_number: Regex::new(
                "(?i)(?:Roll no\\. ?|Record Vote (?:No|Number): ?)(?P<roll>\\d+)",
            )?,
        })
    }

    /// Classify one action against the previous status
    pub fn classify(
        &self,
        raw: &RawAction,
        ctx: &BillContext<'_>,
        prev_status: BillStatus,
    ) -> ClassifiedAction {
        let mut action = ClassifiedAction::plain(
            ActedAt::new(&raw.acted_at_date, raw.acted_at_time.as_deref()),
            raw.action_code.clone(),
            raw.text.clone(),
        );

        // Fixed rule order; every rule runs and later updates overwrite
        // the overlapping fields of earlier ones.
        let updates = [
            self.rule_house_vote(&raw.text, ctx, prev_status),
            self.rule_house_special_rule(&raw.text, ctx, prev_status),
            self.rule_house_table(&raw.text, ctx, prev_status),
            self.rule_senate_vote(&raw.text, ctx, prev_status),
            self.rule_calendar(&raw.text, prev_status),
            self.rule_committee_report(&raw.text, prev_status),
            self.rule_hearings(&raw.text),
            self.rule_discharged(&raw.text, prev_status),
            self.rule_to_president(&raw.text),
            self.rule_signed(&raw.text),
            self.rule_vetoed(&raw.text),
            self.rule_ten_day_rule(&raw.text),
            self.rule_enacted(&raw.text, prev_status),
            self.rule_referral(&raw.text, prev_status),
        ];
        for update in updates {
            if let Some(update) = update {
                update.apply(&mut action);
            }
        }
        action
    }

    /// Replay a chronological (oldest-first) action sequence
    pub fn classify_actions(
        &self,
        raws: &[RawAction],
        ctx: &BillContext<'_>,
    ) -> ClassifiedActions {
        let mut status = BillStatus::Introduced;
        let mut status_at = None;
        let mut actions = Vec::with_capacity(raws.len());

        for raw in raws {
            let action = self.classify(raw, ctx, status);
            if let Some(new_status) = action.status {
                status = new_status;
                status_at = Some(action.acted_at.clone());
            }
            actions.push(action);
        }

        ClassifiedActions {
            actions,
            status,
            status_at,
        }
    }

    /// Vote method and roll-call number from the captured method text
    fn how_and_roll(&self, how_text: &str) -> (String, Option<String>) {
        match self.roll_number.captures(how_text) {
            Some(caps) => ("roll".to_string(), Some(caps["roll"].to_string())),
            None => {
                let how = how_text.trim_start_matches(',').trim().to_lowercase();
                (how, None)
            }
        }
    }

    /// Rule 1: House vote-on-passage family
    fn rule_house_vote(
        &self,
        text: &str,
        ctx: &BillContext<'_>,
        prev_status: BillStatus,
    ) -> Option<ActionUpdate> {
        let caps = self.house_vote.captures(text)?;
        let motion = caps.name("motion")?.as_str();
        let motion_lower = motion.to_lowercase();
        let two_thirds = motion_lower.starts_with("two-thirds of the members present");

        // Without a recorded method the match is only trusted for the
        // self-describing two-thirds form; bare "Passed House" texts belong
        // to the special-rule rule.
        let how_text = caps.name("how").map(|m| m.as_str());
        if how_text.is_none() && !two_thirds {
            return None;
        }

        let is_override = caps.name("override").is_some();
        let as_amended =
            caps.name("amended").is_some() || motion_lower.contains("agree with an amendment");
        let passed = match caps.name("result").map(|m| m.as_str().to_lowercase()) {
            Some(word) => word == "passed" || word == "agreed to",
            None => two_thirds || motion_lower.contains("agreed to senate amendment"),
        };

        let vote_type = if is_override {
            VoteType::Override
        } else if motion_lower.contains("senate amendment") {
            VoteType::Pingpong
        } else if motion_lower.contains("conference report") {
            VoteType::Conference
        } else if ctx.bill_type.originating_chamber() == Chamber::House {
            VoteType::Vote
        } else {
            VoteType::Vote2
        };

        let (how, roll) = match how_text {
            Some(how_text) => {
                let (how, roll) = self.how_and_roll(how_text);
                (Some(how), roll)
            }
            None => (None, None),
        };
        let suspension = motion_lower.starts_with("on motion to suspend the rules");

        let status = status_after_vote(&VoteOutcome {
            vote_type,
            passed,
            chamber: Chamber::House,
            bill_type: ctx.bill_type,
            suspension,
            as_amended,
            official_title: ctx.official_title,
            prev_status,
        });

        Some(ActionUpdate {
            action_type: Some(ActionType::Vote),
            status,
            vote_type: Some(vote_type),
            chamber: Some(Chamber::House),
            how,
            result: Some(if passed { VoteResult::Pass } else { VoteResult::Fail }),
            roll,
            suspension: suspension.then_some(true),
            as_amended: as_amended.then_some(true),
            ..Default::default()
        })
    }

    /// Rule 2: non-recorded House passage under a special rule
    fn rule_house_special_rule(
        &self,
        text: &str,
        ctx: &BillContext<'_>,
        prev_status: BillStatus,
    ) -> Option<ActionUpdate> {
        let caps = self.house_special_rule.captures(text)?;
        let motion_lower = caps.name("motion")?.as_str().to_lowercase();
        let as_amended = caps.name("amended").is_some();

        let vote_type = if motion_lower.contains("senate amendment") {
            VoteType::Pingpong
        } else if ctx.bill_type.originating_chamber() == Chamber::House {
            VoteType::Vote
        } else {
            VoteType::Vote2
        };

        let status = status_after_vote(&VoteOutcome {
            vote_type,
            passed: true,
            chamber: Chamber::House,
            bill_type: ctx.bill_type,
            suspension: false,
            as_amended,
            official_title: ctx.official_title,
            prev_status,
        });

        Some(ActionUpdate {
            action_type: Some(ActionType::Vote),
            status,
            vote_type: Some(vote_type),
            chamber: Some(Chamber::House),
            how: Some("by special rule".to_string()),
            result: Some(VoteResult::Pass),
            as_amended: as_amended.then_some(true),
            ..Default::default()
        })
    }

    /// Rule 3: an agreed-to motion to table kills the measure
    fn rule_house_table(
        &self,
        text: &str,
        ctx: &BillContext<'_>,
        prev_status: BillStatus,
    ) -> Option<ActionUpdate> {
        let caps = self.house_table.captures(text)?;

        let vote_type = if prev_status == BillStatus::Introduced || ctx.bill_type == BillType::Hres
        {
            VoteType::Vote
        } else {
            VoteType::Vote2
        };

        let (how, roll) = match caps.name("how") {
            Some(how_text) => {
                let (how, roll) = self.how_and_roll(how_text.as_str());
                (Some(how), roll)
            }
            None => (None, None),
        };

        let status = status_after_vote(&VoteOutcome {
            vote_type,
            passed: false,
            chamber: Chamber::House,
            bill_type: ctx.bill_type,
            suspension: false,
            as_amended: false,
            official_title: ctx.official_title,
            prev_status,
        });

        Some(ActionUpdate {
            action_type: Some(ActionType::Vote),
            status,
            vote_type: Some(vote_type),
            chamber: Some(Chamber::House),
            how,
            result: Some(VoteResult::Fail),
            roll,
            ..Default::default()
        })
    }

    /// Rule 4: Senate vote-on-passage family, cloture included
    fn rule_senate_vote(
        &self,
        text: &str,
        ctx: &BillContext<'_>,
        prev_status: BillStatus,
    ) -> Option<ActionUpdate> {
        let caps = self.senate_vote.captures(text)?;
        let motion_lower = caps.name("motion")?.as_str().to_lowercase();

        let passed = if motion_lower.starts_with("disagreed")
            || motion_lower.starts_with("failed")
            || motion_lower.contains("not invoked")
        {
            false
        } else {
            ["passed", "agreed", "concurred", "invoked"]
                .iter()
                .any(|word| motion_lower.contains(word))
        };

        let is_override = caps.name("override").is_some();
        let is_cloture = motion_lower.contains("cloture");
        let vote_type = if is_override {
            VoteType::Override
        } else if is_cloture {
            VoteType::Cloture
        } else if motion_lower.contains("house amendment") || motion_lower.contains("receded") {
            VoteType::Pingpong
        } else if motion_lower.contains("conference report") {
            VoteType::Conference
        } else if ctx.bill_type.originating_chamber() == Chamber::Senate {
            VoteType::Vote
        } else {
            VoteType::Vote2
        };

        let as_amended = caps.name("amended").is_some();
        let (how, roll) = match caps.name("how") {
            Some(how_text) => {
                let (how, roll) = self.how_and_roll(how_text.as_str());
                (Some(how), roll)
            }
            None => (None, None),
        };

        let status = status_after_vote(&VoteOutcome {
            vote_type,
            passed,
            chamber: Chamber::Senate,
            bill_type: ctx.bill_type,
            suspension: false,
            as_amended,
            official_title: ctx.official_title,
            prev_status,
        });

        Some(ActionUpdate {
            // Cloture is procedure around the vote, not a passage vote
            action_type: Some(if is_cloture { ActionType::VoteAux } else { ActionType::Vote }),
            status,
            vote_type: Some(vote_type),
            chamber: Some(Chamber::Senate),
            how,
            result: Some(if passed { VoteResult::Pass } else { VoteResult::Fail }),
            roll,
            as_amended: as_amended.then_some(true),
            ..Default::default()
        })
    }

    /// Rule 5: calendar placement and suspension-track reporting
    fn rule_calendar(&self, text: &str, prev_status: BillStatus) -> Option<ActionUpdate> {
        self.calendar.is_match(text).then(|| ActionUpdate {
            action_type: Some(ActionType::Calendar),
            status: reported_promotion(prev_status),
            ..Default::default()
        })
    }

    /// Rule 6: committee reported the bill
    fn rule_committee_report(&self, text: &str, prev_status: BillStatus) -> Option<ActionUpdate> {
        let caps = self
            .committee_report
            .captures(text)
            .or_else(|| self.senate_report_93.captures(text))?;
        Some(ActionUpdate {
            action_type: Some(ActionType::Reported),
            status: reported_promotion(prev_status),
            committee: Some(caps["committee"].to_string()),
            ..Default::default()
        })
    }

    /// Rule 7: hearings held (no status effect)
    fn rule_hearings(&self, text: &str) -> Option<ActionUpdate> {
        let caps = self.hearings.captures(text)?;
        Some(ActionUpdate {
            action_type: Some(ActionType::Hearings),
            committee: Some(caps["committee"].to_string()),
            ..Default::default()
        })
    }

    /// Rule 8: committee discharged without reporting
    fn rule_discharged(&self, text: &str, prev_status: BillStatus) -> Option<ActionUpdate> {
        let caps = self.discharged.captures(text)?;
        Some(ActionUpdate {
            action_type: Some(ActionType::Discharged),
            status: reported_promotion(prev_status),
            committee: Some(caps["committee"].to_string()),
            ..Default::default()
        })
    }

    /// Rule 9: cleared for or presented to the President
    fn rule_to_president(&self, text: &str) -> Option<ActionUpdate> {
        self.to_president.is_match(text).then(|| ActionUpdate {
            action_type: Some(ActionType::ToPresident),
            ..Default::default()
        })
    }

    /// Rule 10: signed into law
    fn rule_signed(&self, text: &str) -> Option<ActionUpdate> {
        self.signed.is_match(text).then(|| ActionUpdate {
            action_type: Some(ActionType::Signed),
            status: Some(BillStatus::EnactedSigned),
            ..Default::default()
        })
    }

    /// Rule 11: vetoed; a pocket veto is final, a regular veto provisional
    fn rule_vetoed(&self, text: &str) -> Option<ActionUpdate> {
        if self.pocket_vetoed.is_match(text) {
            Some(ActionUpdate {
                action_type: Some(ActionType::Vetoed),
                status: Some(BillStatus::VetoedPocket),
                ..Default::default()
            })
        } else if self.vetoed.is_match(text) {
            Some(ActionUpdate {
                action_type: Some(ActionType::Vetoed),
                status: Some(BillStatus::ProvKillVeto),
                ..Default::default()
            })
        } else {
            None
        }
    }

    /// Rule 12: became law unsigned under the ten-day rule
    fn rule_ten_day_rule(&self, text: &str) -> Option<ActionUpdate> {
        self.ten_day_rule.is_match(text).then(|| ActionUpdate {
            status: Some(BillStatus::EnactedTenDayRule),
            ..Default::default()
        })
    }

    /// Rule 13: public/private law citation
    fn rule_enacted(&self, text: &str, prev_status: BillStatus) -> Option<ActionUpdate> {
        let caps = self.enacted.captures(text)?;
        let kind = if caps["kind"].eq_ignore_ascii_case("public") {
            LawKind::Public
        } else {
            LawKind::Private
        };
        let law = LawCitation {
            kind,
            congress: caps["congress"].parse().ok()?,
            number: caps["number"].parse().ok()?,
        };
        Some(ActionUpdate {
            action_type: Some(ActionType::Enacted),
            status: status_after_enacted(prev_status),
            law: Some(law),
            ..Default::default()
        })
    }

    /// Rule 14: committee referral
    fn rule_referral(&self, text: &str, prev_status: BillStatus) -> Option<ActionUpdate> {
        self.referral.is_match(text).then(|| ActionUpdate {
            action_type: Some(ActionType::Referral),
            status: (prev_status == BillStatus::Introduced).then_some(BillStatus::Referred),
            ..Default::default()
        })
    }
}

/// Committee activity promotes INTRODUCED/REFERRED bills to REPORTED
fn reported_promotion(prev_status: BillStatus) -> Option<BillStatus> {
    matches!(prev_status, BillStatus::Introduced | BillStatus::Referred)
        .then_some(BillStatus::Reported)
}
