//! Exhaustive checks of the vote-outcome transition table.

use billbot::status::{status_after_enacted, status_after_vote, BillStatus, ALL_STATUSES};
use billbot::types::{BillType, Chamber, VoteType};
use billbot::VoteOutcome;

const CONST_AMEND_TITLE: &str =
    "Proposing an amendment to the Constitution of the United States relative to equal rights.";

const ALL_BILL_TYPES: [BillType; 8] = [
    BillType::Hr,
    BillType::Hres,
    BillType::Hjres,
    BillType::Hconres,
    BillType::S,
    BillType::Sres,
    BillType::Sjres,
    BillType::Sconres,
];

fn outcome(
    vote_type: VoteType,
    passed: bool,
    chamber: Chamber,
    bill_type: BillType,
) -> VoteOutcome<'static> {
    VoteOutcome {
        vote_type,
        passed,
        chamber,
        bill_type,
        suspension: false,
        as_amended: false,
        official_title: None,
        prev_status: BillStatus::Introduced,
    }
}

#[test]
fn originating_vote_pass() {
    // Simple resolutions pass in place regardless of chamber
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote, true, Chamber::House, BillType::Hres)),
        Some(BillStatus::PassedSimpleRes)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote, true, Chamber::Senate, BillType::Sres)),
        Some(BillStatus::PassedSimpleRes)
    );
    // Everything else passes over to the other chamber
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote, true, Chamber::House, BillType::Hr)),
        Some(BillStatus::PassOverHouse)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote, true, Chamber::Senate, BillType::S)),
        Some(BillStatus::PassOverSenate)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote, true, Chamber::House, BillType::Hjres)),
        Some(BillStatus::PassOverHouse)
    );
}

#[test]
fn originating_vote_fail() {
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote, false, Chamber::House, BillType::Hr)),
        Some(BillStatus::FailOriginatingHouse)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote, false, Chamber::Senate, BillType::S)),
        Some(BillStatus::FailOriginatingSenate)
    );

    let mut suspended = outcome(VoteType::Vote, false, Chamber::House, BillType::Hr);
    suspended.suspension = true;
    assert_eq!(
        status_after_vote(&suspended),
        Some(BillStatus::ProvKillSuspensionFailed)
    );
}

#[test]
fn second_chamber_pass_amended_goes_back() {
    for vote_type in [VoteType::Vote2, VoteType::Pingpong] {
        let mut o = outcome(vote_type, true, Chamber::Senate, BillType::Hr);
        o.as_amended = true;
        assert_eq!(status_after_vote(&o), Some(BillStatus::PassBackSenate));

        let mut o = outcome(vote_type, true, Chamber::House, BillType::S);
        o.as_amended = true;
        assert_eq!(status_after_vote(&o), Some(BillStatus::PassBackHouse));
    }
}

#[test]
fn second_chamber_pass_unamended_finishes_the_measure() {
    for vote_type in [VoteType::Vote2, VoteType::Pingpong] {
        // Constitutional amendment: joint resolution with the marker title
        let mut o = outcome(vote_type, true, Chamber::Senate, BillType::Hjres);
        o.official_title = Some(CONST_AMEND_TITLE);
        assert_eq!(status_after_vote(&o), Some(BillStatus::PassedConstAmend));

        let mut o = outcome(vote_type, true, Chamber::House, BillType::Sjres);
        o.official_title = Some(CONST_AMEND_TITLE);
        assert_eq!(status_after_vote(&o), Some(BillStatus::PassedConstAmend));

        // Joint resolution without the marker title is an ordinary bill
        let mut o = outcome(vote_type, true, Chamber::Senate, BillType::Hjres);
        o.official_title = Some("Making continuing appropriations.");
        assert_eq!(status_after_vote(&o), Some(BillStatus::PassedBill));

        // Concurrent resolutions
        assert_eq!(
            status_after_vote(&outcome(vote_type, true, Chamber::Senate, BillType::Hconres)),
            Some(BillStatus::PassedConcurrentRes)
        );
        assert_eq!(
            status_after_vote(&outcome(vote_type, true, Chamber::House, BillType::Sconres)),
            Some(BillStatus::PassedConcurrentRes)
        );

        // Plain bills
        assert_eq!(
            status_after_vote(&outcome(vote_type, true, Chamber::Senate, BillType::Hr)),
            Some(BillStatus::PassedBill)
        );
    }
}

#[test]
fn second_chamber_fail() {
    // Pingpong failure is provisional whatever the flags say
    let mut o = outcome(VoteType::Pingpong, false, Chamber::Senate, BillType::Hr);
    assert_eq!(status_after_vote(&o), Some(BillStatus::ProvKillPingPongFail));
    o.suspension = true;
    assert_eq!(status_after_vote(&o), Some(BillStatus::ProvKillPingPongFail));

    // Second-chamber suspension failure is provisional
    let mut o = outcome(VoteType::Vote2, false, Chamber::House, BillType::S);
    o.suspension = true;
    assert_eq!(
        status_after_vote(&o),
        Some(BillStatus::ProvKillSuspensionFailed)
    );

    // Otherwise the second chamber kills the bill
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote2, false, Chamber::House, BillType::S)),
        Some(BillStatus::FailSecondHouse)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Vote2, false, Chamber::Senate, BillType::Hr)),
        Some(BillStatus::FailSecondSenate)
    );
}

#[test]
fn cloture() {
    assert_eq!(
        status_after_vote(&outcome(VoteType::Cloture, false, Chamber::Senate, BillType::Hr)),
        Some(BillStatus::ProvKillClotureFailed)
    );
    // Successful cloture changes nothing
    assert_eq!(
        status_after_vote(&outcome(VoteType::Cloture, true, Chamber::Senate, BillType::Hr)),
        None
    );
}

#[test]
fn override_votes() {
    // Failure in the originating chamber
    assert_eq!(
        status_after_vote(&outcome(VoteType::Override, false, Chamber::House, BillType::Hr)),
        Some(BillStatus::VetoedOverrideFailOriginatingHouse)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Override, false, Chamber::Senate, BillType::S)),
        Some(BillStatus::VetoedOverrideFailOriginatingSenate)
    );
    // Failure in the second chamber
    assert_eq!(
        status_after_vote(&outcome(VoteType::Override, false, Chamber::House, BillType::S)),
        Some(BillStatus::VetoedOverrideFailSecondHouse)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Override, false, Chamber::Senate, BillType::Hr)),
        Some(BillStatus::VetoedOverrideFailSecondSenate)
    );
    // Success in the originating chamber: waiting on the other chamber
    assert_eq!(
        status_after_vote(&outcome(VoteType::Override, true, Chamber::House, BillType::Hr)),
        Some(BillStatus::VetoedOverridePassOverHouse)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Override, true, Chamber::Senate, BillType::S)),
        Some(BillStatus::VetoedOverridePassOverSenate)
    );
    // Success in the second chamber completes the override
    assert_eq!(
        status_after_vote(&outcome(VoteType::Override, true, Chamber::Senate, BillType::Hr)),
        Some(BillStatus::EnactedVetoOverride)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Override, true, Chamber::House, BillType::S)),
        Some(BillStatus::EnactedVetoOverride)
    );
}

#[test]
fn conference_reports() {
    // First chamber to adopt the report
    assert_eq!(
        status_after_vote(&outcome(VoteType::Conference, true, Chamber::House, BillType::Hr)),
        Some(BillStatus::ConferencePassedHouse)
    );
    assert_eq!(
        status_after_vote(&outcome(VoteType::Conference, true, Chamber::Senate, BillType::Hr)),
        Some(BillStatus::ConferencePassedSenate)
    );

    // Second chamber resolves via the unamended-passage branch
    let mut o = outcome(VoteType::Conference, true, Chamber::Senate, BillType::Hr);
    o.prev_status = BillStatus::ConferencePassedHouse;
    assert_eq!(status_after_vote(&o), Some(BillStatus::PassedBill));

    let mut o = outcome(VoteType::Conference, true, Chamber::House, BillType::Sconres);
    o.prev_status = BillStatus::ConferencePassedSenate;
    assert_eq!(status_after_vote(&o), Some(BillStatus::PassedConcurrentRes));

    // A failed conference vote changes nothing
    assert_eq!(
        status_after_vote(&outcome(VoteType::Conference, false, Chamber::House, BillType::Hr)),
        None
    );
}

#[test]
fn enactment_by_citation() {
    // Terminal states: administrative no-op
    for prev in [
        BillStatus::EnactedSigned,
        BillStatus::EnactedVetoOverride,
        BillStatus::EnactedTenDayRule,
    ] {
        assert_eq!(status_after_enacted(prev), None);
    }
    // Veto lineage: the citation is the evidence of a completed override
    assert_eq!(
        status_after_enacted(BillStatus::ProvKillVeto),
        Some(BillStatus::EnactedVetoOverride)
    );
    for prev in ALL_STATUSES {
        if prev.is_vetoed() {
            assert_eq!(status_after_enacted(prev), Some(BillStatus::EnactedVetoOverride));
        }
    }
    // Anything else: no forced change
    for prev in [
        BillStatus::Introduced,
        BillStatus::PassedBill,
        BillStatus::PassOverHouse,
        BillStatus::ProvKillSuspensionFailed,
    ] {
        assert_eq!(status_after_enacted(prev), None);
    }
}

/// The transition function is total: every combination yields a defined
/// answer, and a "no change" only where the table says so.
#[test]
fn transition_function_is_total() {
    let vote_types = [
        VoteType::Vote,
        VoteType::Vote2,
        VoteType::Pingpong,
        VoteType::Cloture,
        VoteType::Override,
        VoteType::Conference,
    ];
    for vote_type in vote_types {
        for passed in [true, false] {
            for chamber in [Chamber::House, Chamber::Senate] {
                for bill_type in ALL_BILL_TYPES {
                    for suspension in [true, false] {
                        for as_amended in [true, false] {
                            for prev_status in ALL_STATUSES {
                                let o = VoteOutcome {
                                    vote_type,
                                    passed,
                                    chamber,
                                    bill_type,
                                    suspension,
                                    as_amended,
                                    official_title: Some(CONST_AMEND_TITLE),
                                    prev_status,
                                };
                                let next = status_after_vote(&o);
                                let unchanged_ok = (vote_type == VoteType::Cloture && passed)
                                    || (vote_type == VoteType::Conference && !passed);
                                assert_eq!(next.is_none(), unchanged_ok);
                            }
                        }
                    }
                }
            }
        }
    }
}
