//! Entity normalization.
//!
//! Flattens one parsed status-document tree into typed entities: identity,
//! raw titles and actions, sponsor, cosponsors, summaries, related bills.
//! Missing optional sections are legitimately empty; a missing identity
//! field or an identity that does not parse back from its composed id is
//! fatal for the bill.

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::tree;
use crate::types::{BillIdentity, BillType, Cosponsor, RawAction, RelatedBill, Sponsor};

/// A title entry before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTitle {
    pub label: String,
    pub text: String,
}

/// A summary entry before HTML conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSummary {
    pub date: Option<String>,
    pub action_desc: Option<String>,
    pub html: String,
}

/// Everything the engine extracts from one status document
#[derive(Debug, Clone)]
pub struct BillFacts {
    pub identity: BillIdentity,
    /// Top-level display title of the document
    pub title: Option<String>,
    pub introduced_at: Option<String>,
    pub updated_at: Option<String>,
    pub raw_titles: Vec<RawTitle>,
    pub raw_actions: Vec<RawAction>,
    pub sponsor: Option<Sponsor>,
    pub cosponsors: Vec<Cosponsor>,
    pub summaries: Vec<RawSummary>,
    pub related_bills: Vec<RelatedBill>,
    pub subjects_top_term: Option<String>,
}

/// String form of a scalar leaf; the feed mixes strings and numbers
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(tree_value: &Value, name: &str) -> Option<String> {
    tree::field(tree_value, name).and_then(scalar_string)
}

fn bool_field(tree_value: &Value, name: &str) -> bool {
    match tree::field(tree_value, name) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("y"),
        _ => false,
    }
}

/// Parse the bill identity, validating it round-trips through the composed id
fn identity(tree_value: &Value) -> Result<BillIdentity> {
    let bill_type = string_field(tree_value, "billType")
        .ok_or(Error::MissingField("billType"))?
        .to_lowercase();
    let number = string_field(tree_value, "billNumber").ok_or(Error::MissingField("billNumber"))?;
    let congress = string_field(tree_value, "congress").ok_or(Error::MissingField("congress"))?;

    let candidate = format!("{}{}-{}", bill_type, number, congress);
    let bill_id_re = Regex::new(r"^([a-z]+)(\d+)-(\d+)$")?;
    let caps = bill_id_re
        .captures(&candidate)
        .ok_or_else(|| Error::InvalidBillId(candidate.clone()))?;

    let bill_type = BillType::parse(&caps[1]).ok_or_else(|| Error::InvalidBillId(candidate.clone()))?;
    let number: u32 = caps[2]
        .parse()
        .map_err(|_| Error::InvalidBillId(candidate.clone()))?;
    let congress: u32 = caps[3]
        .parse()
        .map_err(|_| Error::InvalidBillId(candidate.clone()))?;

    Ok(BillIdentity::new(bill_type, number, congress))
}

fn raw_titles(tree_value: &Value) -> Vec<RawTitle> {
    tree::items(tree_value, "titles")
        .into_iter()
        .filter_map(|item| {
            Some(RawTitle {
                label: string_field(item, "titleType")?,
                text: string_field(item, "title")?,
            })
        })
        .collect()
}

fn raw_actions(tree_value: &Value) -> Vec<RawAction> {
    tree::items(tree_value, "actions")
        .into_iter()
        .map(|item| {
            let source_system_code = tree::field(item, "sourceSystem")
                .and_then(|source| string_field(source, "code"));
            RawAction {
                acted_at_date: string_field(item, "actionDate").unwrap_or_default(),
                acted_at_time: string_field(item, "actionTime"),
                action_code: string_field(item, "actionCode"),
                source_system_code,
                text: string_field(item, "text").unwrap_or_default(),
            }
        })
        .collect()
}

fn sponsor(tree_value: &Value) -> Option<Sponsor> {
    let item = tree::items(tree_value, "sponsors").into_iter().next()?;
    Some(Sponsor {
        bioguide_id: string_field(item, "bioguideId"),
        name: string_field(item, "fullName"),
        party: string_field(item, "party"),
        state: string_field(item, "state"),
        district: string_field(item, "district"),
    })
}

fn cosponsors(tree_value: &Value) -> Vec<Cosponsor> {
    tree::items(tree_value, "cosponsors")
        .into_iter()
        .map(|item| Cosponsor {
            bioguide_id: string_field(item, "bioguideId"),
            name: string_field(item, "fullName"),
            party: string_field(item, "party"),
            state: string_field(item, "state"),
            district: string_field(item, "district"),
            sponsored_at: string_field(item, "sponsorshipDate"),
            withdrawn_at: string_field(item, "sponsorshipWithdrawnDate"),
            original_cosponsor: bool_field(item, "isOriginalCosponsor"),
        })
        .collect()
}

fn summaries(tree_value: &Value) -> Vec<RawSummary> {
    let Some(container) = tree::field(tree_value, "summaries") else {
        return Vec::new();
    };
    tree::items(container, "billSummaries")
        .into_iter()
        .filter_map(|item| {
            Some(RawSummary {
                date: string_field(item, "actionDate"),
                action_desc: string_field(item, "actionDesc"),
                html: string_field(item, "text")?,
            })
        })
        .collect()
}

fn related_bills(tree_value: &Value) -> Vec<RelatedBill> {
    tree::items(tree_value, "relatedBills")
        .into_iter()
        .filter_map(|item| {
            let bill_type = string_field(item, "type")?.to_lowercase();
            let number = string_field(item, "number")?;
            let congress = string_field(item, "congress")?;
            let reason = tree::items(item, "relationshipDetails")
                .into_iter()
                .next()
                .and_then(|detail| string_field(detail, "type"))
                .map(|reason| reason.to_lowercase());
            Some(RelatedBill {
                reason,
                bill_id: format!("{}{}-{}", bill_type, number, congress),
            })
        })
        .collect()
}

/// Normalize one status-document tree into typed entities
pub fn normalize_bill(tree_value: &Value) -> Result<BillFacts> {
    let identity = identity(tree_value)?;
    let subjects_top_term = tree::field(tree_value, "policyArea")
        .and_then(|area| string_field(area, "name"));

    Ok(BillFacts {
        identity,
        title: string_field(tree_value, "title"),
        introduced_at: string_field(tree_value, "introducedDate"),
        updated_at: string_field(tree_value, "updateDate"),
        raw_titles: raw_titles(tree_value),
        raw_actions: raw_actions(tree_value),
        sponsor: sponsor(tree_value),
        cosponsors: cosponsors(tree_value),
        summaries: summaries(tree_value),
        related_bills: related_bills(tree_value),
        subjects_top_term,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_round_trips() {
        let tree_value = json!({
            "billType": "HR",
            "billNumber": "1500",
            "congress": "116",
        });
        let facts = normalize_bill(&tree_value).unwrap();
        assert_eq!(facts.identity.bill_id(), "hr1500-116");
        assert_eq!(facts.identity.bill_type(), BillType::Hr);
        assert_eq!(facts.identity.number(), 1500);
        assert_eq!(facts.identity.congress(), 116);
    }

    #[test]
    fn test_missing_identity_field_is_fatal() {
        let tree_value = json!({ "billType": "HR", "congress": "116" });
        let err = normalize_bill(&tree_value).unwrap_err();
        assert!(matches!(err, Error::MissingField("billNumber")));
    }

    #[test]
    fn test_unparseable_identity_is_fatal() {
        let tree_value = json!({
            "billType": "XYZ",
            "billNumber": "10",
            "congress": "116",
        });
        let err = normalize_bill(&tree_value).unwrap_err();
        assert!(matches!(err, Error::InvalidBillId(_)));
    }

    #[test]
    fn test_absent_sections_are_empty_not_errors() {
        let tree_value = json!({
            "billType": "s",
            "billNumber": 47,
            "congress": 116,
        });
        let facts = normalize_bill(&tree_value).unwrap();
        assert!(facts.raw_titles.is_empty());
        assert!(facts.raw_actions.is_empty());
        assert!(facts.sponsor.is_none());
        assert!(facts.cosponsors.is_empty());
        assert!(facts.summaries.is_empty());
        assert!(facts.related_bills.is_empty());
    }

    #[test]
    fn test_actions_and_source_system() {
        let tree_value = json!({
            "billType": "hr",
            "billNumber": "1",
            "congress": "116",
            "actions": { "item": [
                {
                    "actionDate": "2019-01-03",
                    "actionTime": "10:15:00",
                    "actionCode": "H11100",
                    "sourceSystem": { "code": "2", "name": "House floor actions" },
                    "text": "Referred to the Committee on Appropriations."
                },
                {
                    "actionDate": "2019-01-03",
                    "sourceSystem": { "code": "9", "name": "Library of Congress" },
                    "text": "Introduced in House"
                }
            ]}
        });
        let facts = normalize_bill(&tree_value).unwrap();
        assert_eq!(facts.raw_actions.len(), 2);
        assert_eq!(facts.raw_actions[0].acted_at_time.as_deref(), Some("10:15:00"));
        assert_eq!(facts.raw_actions[0].source_system_code.as_deref(), Some("2"));
        assert_eq!(facts.raw_actions[1].source_system_code.as_deref(), Some("9"));
    }

    #[test]
    fn test_sponsor_cosponsors_and_related() {
        let tree_value = json!({
            "billType": "hr",
            "billNumber": "1",
            "congress": "116",
            "policyArea": { "name": "Government Operations and Politics" },
            "sponsors": { "item": [{
                "bioguideId": "S000510",
                "fullName": "Rep. Smith, Adam [D-WA-9]",
                "party": "D",
                "state": "WA",
                "district": 9
            }]},
            "cosponsors": { "item": {
                "bioguideId": "P000197",
                "fullName": "Rep. Pelosi, Nancy [D-CA-12]",
                "party": "D",
                "state": "CA",
                "district": "12",
                "sponsorshipDate": "2019-01-03",
                "isOriginalCosponsor": "True"
            }},
            "relatedBills": { "item": [{
                "type": "S",
                "number": "949",
                "congress": "116",
                "relationshipDetails": { "item": [{
                    "type": "Related bill",
                    "identifiedBy": "CRS"
                }]}
            }]}
        });
        let facts = normalize_bill(&tree_value).unwrap();
        let sponsor = facts.sponsor.unwrap();
        assert_eq!(sponsor.bioguide_id.as_deref(), Some("S000510"));
        assert_eq!(sponsor.district.as_deref(), Some("9"));
        assert_eq!(facts.cosponsors.len(), 1);
        assert!(facts.cosponsors[0].original_cosponsor);
        assert_eq!(facts.related_bills.len(), 1);
        assert_eq!(facts.related_bills[0].bill_id, "s949-116");
        assert_eq!(facts.related_bills[0].reason.as_deref(), Some("related bill"));
        assert_eq!(
            facts.subjects_top_term.as_deref(),
            Some("Government Operations and Politics")
        );
    }

    #[test]
    fn test_summaries_nested_container() {
        let tree_value = json!({
            "billType": "hr",
            "billNumber": "1",
            "congress": "116",
            "summaries": { "billSummaries": { "item": [
                {
                    "actionDate": "2019-01-03",
                    "actionDesc": "Introduced in House",
                    "text": "<p>This bill addresses voter access.</p>"
                }
            ]}}
        });
        let facts = normalize_bill(&tree_value).unwrap();
        assert_eq!(facts.summaries.len(), 1);
        assert_eq!(facts.summaries[0].action_desc.as_deref(), Some("Introduced in House"));
    }
}
