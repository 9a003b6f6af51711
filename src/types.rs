use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::status::BillStatus;

/// The eight bill types carried by the bulk data feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillType {
    Hr,
    Hres,
    Hjres,
    Hconres,
    S,
    Sres,
    Sjres,
    Sconres,
}

impl BillType {
    /// Parse the lowercase feed spelling ("hr", "sjres", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hr" => Some(BillType::Hr),
            "hres" => Some(BillType::Hres),
            "hjres" => Some(BillType::Hjres),
            "hconres" => Some(BillType::Hconres),
            "s" => Some(BillType::S),
            "sres" => Some(BillType::Sres),
            "sjres" => Some(BillType::Sjres),
            "sconres" => Some(BillType::Sconres),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::Hr => "hr",
            BillType::Hres => "hres",
            BillType::Hjres => "hjres",
            BillType::Hconres => "hconres",
            BillType::S => "s",
            BillType::Sres => "sres",
            BillType::Sjres => "sjres",
            BillType::Sconres => "sconres",
        }
    }

    /// Chamber the bill originated in
    pub fn originating_chamber(&self) -> Chamber {
        match self {
            BillType::Hr | BillType::Hres | BillType::Hjres | BillType::Hconres => Chamber::House,
            BillType::S | BillType::Sres | BillType::Sjres | BillType::Sconres => Chamber::Senate,
        }
    }

    /// Simple resolutions never leave their chamber
    pub fn is_simple_resolution(&self) -> bool {
        matches!(self, BillType::Hres | BillType::Sres)
    }

    pub fn is_joint_resolution(&self) -> bool {
        matches!(self, BillType::Hjres | BillType::Sjres)
    }

    pub fn is_concurrent_resolution(&self) -> bool {
        matches!(self, BillType::Hconres | BillType::Sconres)
    }
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chamber of Congress, serialized in the feed's one-letter form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chamber {
    #[serde(rename = "h")]
    House,
    #[serde(rename = "s")]
    Senate,
}

impl Chamber {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chamber::House => "h",
            Chamber::Senate => "s",
        }
    }
}

/// Validated bill identity
///
/// `bill_id` is derived exactly once at construction and never recomputed,
/// so downstream consumers can treat it as immutable even if the typed
/// fields are copied around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillIdentity {
    bill_type: BillType,
    number: u32,
    congress: u32,
    bill_id: String,
}

impl BillIdentity {
    pub fn new(bill_type: BillType, number: u32, congress: u32) -> Self {
        let bill_id = format!("{}{}-{}", bill_type.as_str(), number, congress);
        Self {
            bill_type,
            number,
            congress,
            bill_id,
        }
    }

    pub fn bill_type(&self) -> BillType {
        self.bill_type
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn congress(&self) -> u32 {
        self.congress
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }
}

/// Timestamp of a legislative action
///
/// The feed gives a date and sometimes a time. Malformed values are not
/// validated or corrected; they are carried through verbatim as `Raw` and
/// serialize back to the original string. Downstream consumers of very old
/// bills must tolerate non-ISO values here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActedAt {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Raw(String),
}

impl ActedAt {
    /// Combine the feed's `actionDate` and optional `actionTime`
    pub fn new(date: &str, time: Option<&str>) -> Self {
        match time {
            Some(time) => {
                let joined = format!("{}T{}", date, time);
                match NaiveDateTime::parse_from_str(&joined, "%Y-%m-%dT%H:%M:%S") {
                    Ok(dt) => ActedAt::DateTime(dt),
                    Err(_) => ActedAt::Raw(joined),
                }
            }
            None => match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(d) => ActedAt::Date(d),
                Err(_) => ActedAt::Raw(date.to_string()),
            },
        }
    }
}

impl fmt::Display for ActedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActedAt::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            ActedAt::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            ActedAt::Raw(s) => f.write_str(s),
        }
    }
}

impl Serialize for ActedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// One action as it appears in the status document, source (newest-first) order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAction {
    pub acted_at_date: String,
    pub acted_at_time: Option<String>,
    pub action_code: Option<String>,
    pub source_system_code: Option<String>,
    pub text: String,
}

/// Classified action kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "action")]
    Action,
    #[serde(rename = "vote")]
    Vote,
    #[serde(rename = "vote-aux")]
    VoteAux,
    #[serde(rename = "calendar")]
    Calendar,
    #[serde(rename = "reported")]
    Reported,
    #[serde(rename = "hearings")]
    Hearings,
    #[serde(rename = "discharged")]
    Discharged,
    #[serde(rename = "referral")]
    Referral,
    #[serde(rename = "topresident")]
    ToPresident,
    #[serde(rename = "signed")]
    Signed,
    #[serde(rename = "vetoed")]
    Vetoed,
    #[serde(rename = "enacted")]
    Enacted,
}

/// Kind of passage vote, distinguishing how the chambers are sequencing the bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Originating-chamber vote on passage
    Vote,
    /// Second-chamber vote on passage
    Vote2,
    /// Vote on the other chamber's amendments
    Pingpong,
    /// Senate cloture (not a passage vote)
    Cloture,
    /// Veto override attempt
    Override,
    /// Vote on a conference report
    Conference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteResult {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LawKind {
    Public,
    Private,
}

/// A public/private law citation extracted from an enactment action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawCitation {
    pub kind: LawKind,
    pub congress: u32,
    pub number: u32,
}

/// A typed legislative action with extracted procedural and vote metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedAction {
    pub acted_at: ActedAt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_code: Option<String>,
    pub text: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Present only on the actions that changed the bill status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BillStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_type: Option<VoteType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber: Option<Chamber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspension: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_amended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub law: Option<LawCitation>,
}

impl ClassifiedAction {
    /// Untyped starting point for the classifier cascade
    pub fn plain(acted_at: ActedAt, action_code: Option<String>, text: String) -> Self {
        Self {
            acted_at,
            action_code,
            text,
            action_type: ActionType::Action,
            status: None,
            vote_type: None,
            chamber: None,
            how: None,
            result: None,
            roll: None,
            suspension: None,
            as_amended: None,
            committee: None,
            law: None,
        }
    }
}

/// Title category from the title-type label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleType {
    #[serde(rename = "official")]
    Official,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "popular")]
    Popular,
    #[serde(rename = "display")]
    Display,
    #[serde(rename = "nonbillreport")]
    NonBillReport,
}

/// A typed bill title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(rename = "type")]
    pub title_type: TitleType,
    #[serde(rename = "as")]
    pub title_as: String,
    pub is_for_portion: bool,
}

/// Bill sponsor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bioguide_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

/// Bill cosponsor with sponsorship dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosponsor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bioguide_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsored_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawn_at: Option<String>,
    pub original_cosponsor: bool,
}

/// Current bill summary, text already converted from the source HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub summary_as: Option<String>,
    pub text: String,
}

/// A bill related to this one, with the relationship reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedBill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub bill_id: String,
}

/// Derived history summary, recomputed from scratch on every run
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct History {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_at: Option<ActedAt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_passage_result: Option<VoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_passage_result_at: Option<ActedAt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senate_passage_result: Option<VoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senate_passage_result_at: Option<ActedAt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senate_cloture_result: Option<VoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senate_cloture_result_at: Option<ActedAt>,
    pub vetoed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vetoed_at: Option<ActedAt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_override_result: Option<VoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_override_result_at: Option<ActedAt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senate_override_result: Option<VoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senate_override_result_at: Option<ActedAt>,
    pub enacted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enacted_at: Option<ActedAt>,
    pub awaiting_signature: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awaiting_signature_since: Option<ActedAt>,
}

/// The complete normalized bill record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRecord {
    pub bill_id: String,
    pub bill_type: BillType,
    pub number: u32,
    pub congress: u32,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduced_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<Sponsor>,
    pub cosponsors: Vec<Cosponsor>,
    pub actions: Vec<ClassifiedAction>,
    pub history: History,
    pub status: BillStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_at: Option<ActedAt>,
    pub titles: Vec<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<BillSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects_top_term: Option<String>,
    pub related_bills: Vec<RelatedBill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
