use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::types::{BillType, Chamber, VoteType};

/// Official-title prefix marking a constitutional-amendment joint resolution
const CONST_AMEND_PREFIX: &str = "Proposing an amendment to the Constitution of the United States";

/// Legislative status of a bill
///
/// A closed set internally so transitions can be matched exhaustively;
/// serialized to the historical string spellings at the output boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillStatus {
    Introduced,
    Referred,
    Reported,
    PassOverHouse,
    PassOverSenate,
    PassBackHouse,
    PassBackSenate,
    PassedSimpleRes,
    PassedConstAmend,
    PassedConcurrentRes,
    PassedBill,
    FailOriginatingHouse,
    FailOriginatingSenate,
    FailSecondHouse,
    FailSecondSenate,
    ProvKillSuspensionFailed,
    ProvKillPingPongFail,
    ProvKillClotureFailed,
    ProvKillVeto,
    ConferencePassedHouse,
    ConferencePassedSenate,
    VetoedPocket,
    VetoedOverrideFailOriginatingHouse,
    VetoedOverrideFailOriginatingSenate,
    VetoedOverrideFailSecondHouse,
    VetoedOverrideFailSecondSenate,
    VetoedOverridePassOverHouse,
    VetoedOverridePassOverSenate,
    EnactedSigned,
    EnactedVetoOverride,
    EnactedTenDayRule,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Introduced => "INTRODUCED",
            BillStatus::Referred => "REFERRED",
            BillStatus::Reported => "REPORTED",
            BillStatus::PassOverHouse => "PASS_OVER:HOUSE",
            BillStatus::PassOverSenate => "PASS_OVER:SENATE",
            BillStatus::PassBackHouse => "PASS_BACK:HOUSE",
            BillStatus::PassBackSenate => "PASS_BACK:SENATE",
            BillStatus::PassedSimpleRes => "PASSED:SIMPLERES",
            BillStatus::PassedConstAmend => "PASSED:CONSTAMEND",
            BillStatus::PassedConcurrentRes => "PASSED:CONCURRENTRES",
            BillStatus::PassedBill => "PASSED:BILL",
            BillStatus::FailOriginatingHouse => "FAIL:ORIGINATING:HOUSE",
            BillStatus::FailOriginatingSenate => "FAIL:ORIGINATING:SENATE",
            BillStatus::FailSecondHouse => "FAIL:SECOND:HOUSE",
            BillStatus::FailSecondSenate => "FAIL:SECOND:SENATE",
            BillStatus::ProvKillSuspensionFailed => "PROV_KILL:SUSPENSIONFAILED",
            BillStatus::ProvKillPingPongFail => "PROV_KILL:PINGPONGFAIL",
            BillStatus::ProvKillClotureFailed => "PROV_KILL:CLOTUREFAILED",
            BillStatus::ProvKillVeto => "PROV_KILL:VETO",
            BillStatus::ConferencePassedHouse => "CONFERENCE:PASSED:HOUSE",
            BillStatus::ConferencePassedSenate => "CONFERENCE:PASSED:SENATE",
            BillStatus::VetoedPocket => "VETOED:POCKET",
            BillStatus::VetoedOverrideFailOriginatingHouse => {
                "VETOED:OVERRIDE_FAIL_ORIGINATING:HOUSE"
            }
            BillStatus::VetoedOverrideFailOriginatingSenate => {
                "VETOED:OVERRIDE_FAIL_ORIGINATING:SENATE"
            }
            BillStatus::VetoedOverrideFailSecondHouse => "VETOED:OVERRIDE_FAIL_SECOND:HOUSE",
            BillStatus::VetoedOverrideFailSecondSenate => "VETOED:OVERRIDE_FAIL_SECOND:SENATE",
            BillStatus::VetoedOverridePassOverHouse => "VETOED:OVERRIDE_PASS_OVER:HOUSE",
            BillStatus::VetoedOverridePassOverSenate => "VETOED:OVERRIDE_PASS_OVER:SENATE",
            BillStatus::EnactedSigned => "ENACTED:SIGNED",
            BillStatus::EnactedVetoOverride => "ENACTED:VETO_OVERRIDE",
            BillStatus::EnactedTenDayRule => "ENACTED:TENDAYRULE",
        }
    }

    /// Parse the historical string spelling back into the enum
    pub fn parse(s: &str) -> Option<Self> {
        ALL_STATUSES.iter().copied().find(|st| st.as_str() == s)
    }

    /// Terminal enacted family (`ENACTED:*`)
    pub fn is_enacted(&self) -> bool {
        matches!(
            self,
            BillStatus::EnactedSigned | BillStatus::EnactedVetoOverride | BillStatus::EnactedTenDayRule
        )
    }

    /// Veto family (`VETOED:*`), excluding the provisional-kill veto state
    pub fn is_vetoed(&self) -> bool {
        matches!(
            self,
            BillStatus::VetoedPocket
                | BillStatus::VetoedOverrideFailOriginatingHouse
                | BillStatus::VetoedOverrideFailOriginatingSenate
                | BillStatus::VetoedOverrideFailSecondHouse
                | BillStatus::VetoedOverrideFailSecondSenate
                | BillStatus::VetoedOverridePassOverHouse
                | BillStatus::VetoedOverridePassOverSenate
        )
    }

    /// A chamber has passed a conference report (`CONFERENCE:PASSED:*`)
    pub fn is_conference_passed(&self) -> bool {
        matches!(
            self,
            BillStatus::ConferencePassedHouse | BillStatus::ConferencePassedSenate
        )
    }
}

/// Every status value, for table-driven tests and parsing
pub const ALL_STATUSES: [BillStatus; 31] = [
    BillStatus::Introduced,
    BillStatus::Referred,
    BillStatus::Reported,
    BillStatus::PassOverHouse,
    BillStatus::PassOverSenate,
    BillStatus::PassBackHouse,
    BillStatus::PassBackSenate,
    BillStatus::PassedSimpleRes,
    BillStatus::PassedConstAmend,
    BillStatus::PassedConcurrentRes,
    BillStatus::PassedBill,
    BillStatus::FailOriginatingHouse,
    BillStatus::FailOriginatingSenate,
    BillStatus::FailSecondHouse,
    BillStatus::FailSecondSenate,
    BillStatus::ProvKillSuspensionFailed,
    BillStatus::ProvKillPingPongFail,
    BillStatus::ProvKillClotureFailed,
    BillStatus::ProvKillVeto,
    BillStatus::ConferencePassedHouse,
    BillStatus::ConferencePassedSenate,
    BillStatus::VetoedPocket,
    BillStatus::VetoedOverrideFailOriginatingHouse,
    BillStatus::VetoedOverrideFailOriginatingSenate,
    BillStatus::VetoedOverrideFailSecondHouse,
    BillStatus::VetoedOverrideFailSecondSenate,
    BillStatus::VetoedOverridePassOverHouse,
    BillStatus::VetoedOverridePassOverSenate,
    BillStatus::EnactedSigned,
    BillStatus::EnactedVetoOverride,
    BillStatus::EnactedTenDayRule,
];

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BillStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BillStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = BillStatus;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a legislative status string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<BillStatus, E> {
                BillStatus::parse(v)
                    .ok_or_else(|| E::custom(format!("unknown legislative status: {}", v)))
            }
        }

        deserializer.deserialize_str(StatusVisitor)
    }
}

/// A passage vote as seen by the state machine
#[derive(Debug, Clone, Copy)]
pub struct VoteOutcome<'a> {
    pub vote_type: VoteType,
    pub passed: bool,
    pub chamber: Chamber,
    pub bill_type: BillType,
    pub suspension: bool,
    pub as_amended: bool,
    pub official_title: Option<&'a str>,
    pub prev_status: BillStatus,
}

/// What a measure becomes when its final passage vote succeeds unamended
fn passed_measure(bill_type: BillType, official_title: Option<&str>) -> BillStatus {
    if bill_type.is_joint_resolution()
        && official_title.is_some_and(|t| t.starts_with(CONST_AMEND_PREFIX))
    {
        BillStatus::PassedConstAmend
    } else if bill_type.is_concurrent_resolution() {
        BillStatus::PassedConcurrentRes
    } else {
        BillStatus::PassedBill
    }
}

/// Next status after a passage-family vote
///
/// Pure transition function; `None` means the vote does not move the status
/// (successful cloture, a failed conference vote, or an override handled by
/// the other chamber's outcome).
pub fn status_after_vote(outcome: &VoteOutcome<'_>) -> Option<BillStatus> {
    let VoteOutcome {
        vote_type,
        passed,
        chamber,
        bill_type,
        suspension,
        as_amended,
        official_title,
        prev_status,
    } = *outcome;

    match vote_type {
        VoteType::Vote => {
            if passed {
                if bill_type.is_simple_resolution() {
                    Some(BillStatus::PassedSimpleRes)
                } else {
                    Some(match chamber {
                        Chamber::House => BillStatus::PassOverHouse,
                        Chamber::Senate => BillStatus::PassOverSenate,
                    })
                }
            } else if suspension {
                Some(BillStatus::ProvKillSuspensionFailed)
            } else {
                Some(match chamber {
                    Chamber::House => BillStatus::FailOriginatingHouse,
                    Chamber::Senate => BillStatus::FailOriginatingSenate,
                })
            }
        }
        VoteType::Vote2 | VoteType::Pingpong => {
            if passed {
                if as_amended {
                    Some(match chamber {
                        Chamber::House => BillStatus::PassBackHouse,
                        Chamber::Senate => BillStatus::PassBackSenate,
                    })
                } else {
                    Some(passed_measure(bill_type, official_title))
                }
            } else if vote_type == VoteType::Pingpong {
                Some(BillStatus::ProvKillPingPongFail)
            } else if suspension {
                Some(BillStatus::ProvKillSuspensionFailed)
            } else {
                Some(match chamber {
                    Chamber::House => BillStatus::FailSecondHouse,
                    Chamber::Senate => BillStatus::FailSecondSenate,
                })
            }
        }
        VoteType::Cloture => {
            if passed {
                None
            } else {
                Some(BillStatus::ProvKillClotureFailed)
            }
        }
        VoteType::Override => {
            let originating = bill_type.originating_chamber() == chamber;
            if !passed {
                Some(match (originating, chamber) {
                    (true, Chamber::House) => BillStatus::VetoedOverrideFailOriginatingHouse,
                    (true, Chamber::Senate) => BillStatus::VetoedOverrideFailOriginatingSenate,
                    (false, Chamber::House) => BillStatus::VetoedOverrideFailSecondHouse,
                    (false, Chamber::Senate) => BillStatus::VetoedOverrideFailSecondSenate,
                })
            } else if originating {
                Some(match chamber {
                    Chamber::House => BillStatus::VetoedOverridePassOverHouse,
                    Chamber::Senate => BillStatus::VetoedOverridePassOverSenate,
                })
            } else {
                Some(BillStatus::EnactedVetoOverride)
            }
        }
        VoteType::Conference => {
            if !passed {
                None
            } else if prev_status.is_conference_passed() {
                // Second chamber adopting the conference report finishes the bill
                Some(passed_measure(bill_type, official_title))
            } else {
                Some(match chamber {
                    Chamber::House => BillStatus::ConferencePassedHouse,
                    Chamber::Senate => BillStatus::ConferencePassedSenate,
                })
            }
        }
    }
}

/// Status effect of a "Became Public/Private Law" citation
///
/// The citation is an administrative no-op on an already-enacted bill. After
/// a veto it is the only evidence of a completed override. In any other
/// state the citation leaves the status exactly as previously computed; a
/// missing preceding "Signed by President" action is an upstream gap this
/// engine does not paper over.
pub fn status_after_enacted(prev_status: BillStatus) -> Option<BillStatus> {
    if prev_status.is_enacted() {
        None
    } else if prev_status == BillStatus::ProvKillVeto || prev_status.is_vetoed() {
        Some(BillStatus::EnactedVetoOverride)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_spellings_roundtrip() {
        for status in ALL_STATUSES {
            assert_eq!(BillStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_spellings_exact() {
        insta::assert_snapshot!(BillStatus::PassOverHouse.as_str(), @"PASS_OVER:HOUSE");
        insta::assert_snapshot!(
            BillStatus::VetoedOverrideFailOriginatingSenate.as_str(),
            @"VETOED:OVERRIDE_FAIL_ORIGINATING:SENATE"
        );
        insta::assert_snapshot!(BillStatus::EnactedTenDayRule.as_str(), @"ENACTED:TENDAYRULE");
    }

    #[test]
    fn test_constitutional_amendment_passage() {
        let title = "Proposing an amendment to the Constitution of the United States \
                     relative to balancing the budget.";
        assert_eq!(
            passed_measure(BillType::Hjres, Some(title)),
            BillStatus::PassedConstAmend
        );
        assert_eq!(
            passed_measure(BillType::Hjres, Some("A joint resolution for other purposes.")),
            BillStatus::PassedBill
        );
        assert_eq!(
            passed_measure(BillType::Sconres, None),
            BillStatus::PassedConcurrentRes
        );
    }

    #[test]
    fn test_enacted_citation_after_veto() {
        assert_eq!(
            status_after_enacted(BillStatus::ProvKillVeto),
            Some(BillStatus::EnactedVetoOverride)
        );
        assert_eq!(
            status_after_enacted(BillStatus::VetoedOverridePassOverHouse),
            Some(BillStatus::EnactedVetoOverride)
        );
        // Already terminal: administrative no-op
        assert_eq!(status_after_enacted(BillStatus::EnactedSigned), None);
        // Upstream gap: no forced change
        assert_eq!(status_after_enacted(BillStatus::PassedBill), None);
    }
}
