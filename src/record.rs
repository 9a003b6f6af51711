//! Bill record assembly.
//!
//! Runs the full engine over one parsed status document: normalize entities,
//! classify titles, dedupe and classify actions through the status state
//! machine, summarize history, and emit the normalized bill record.

use regex::Regex;
use serde_json::Value;

use crate::classify::{ActionParser, BillContext};
use crate::dedup::dedupe_actions;
use crate::error::Result;
use crate::history;
use crate::normalize::normalize_bill;
use crate::titles::{classify_title, current_title};
use crate::types::{ActedAt, BillIdentity, BillRecord, BillSummary, Title, TitleType};

/// HTML-to-text conversion, an external capability of the surrounding system
///
/// The real converter lives outside this crate; [`TagStripper`] is the
/// minimal default shipped so the pipeline is usable end to end.
pub trait HtmlToText {
    fn convert(&self, html: &str) -> String;
}

/// Default converter: drops tags, unescapes common entities, collapses
/// whitespace
pub struct TagStripper {
    tag_re: Regex,
    whitespace_re: Regex,
}

impl TagStripper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tag_re: Regex::new(r"<[^>]*>")?,
            whitespace_re: Regex::new(r"\s+")?,
        })
    }
}

impl HtmlToText for TagStripper {
    fn convert(&self, html: &str) -> String {
        let text = self.tag_re.replace_all(html, " ");
        let text = text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");
        self.whitespace_re.replace_all(text.trim(), " ").into_owned()
    }
}

/// Canonical bulk-data location of the source status document
pub fn bill_url(identity: &BillIdentity) -> String {
    format!(
        "https://www.govinfo.gov/bulkdata/BILLSTATUS/{congress}/{bill_type}/BILLSTATUS-{congress}{bill_type}{number}.xml",
        congress = identity.congress(),
        bill_type = identity.bill_type(),
        number = identity.number(),
    )
}

/// Builds normalized bill records from parsed status documents
pub struct RecordBuilder {
    parser: ActionParser,
}

impl RecordBuilder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: ActionParser::new()?,
        })
    }

    /// Process one document tree into a complete bill record
    pub fn build(&self, tree_value: &Value, html: &dyn HtmlToText) -> Result<BillRecord> {
        let facts = normalize_bill(tree_value)?;

        let titles: Vec<Title> = facts
            .raw_titles
            .iter()
            .map(|raw| classify_title(&raw.label, &raw.text))
            .collect::<Result<_>>()?;

        let official_title =
            current_title(&titles, TitleType::Official).or_else(|| facts.title.clone());
        let short_title = current_title(&titles, TitleType::Short);
        let popular_title = current_title(&titles, TitleType::Popular);

        let chronological = dedupe_actions(&facts.raw_actions)?;
        let context = BillContext {
            bill_type: facts.identity.bill_type(),
            official_title: official_title.as_deref(),
        };
        let outcome = self.parser.classify_actions(&chronological, &context);

        let history = history::summarize(&outcome.actions);

        // A bill with no status-changing action has been INTRODUCED since
        // its introduction date.
        let status_at = outcome.status_at.or_else(|| {
            facts
                .introduced_at
                .as_deref()
                .map(|date| ActedAt::new(date, None))
        });

        let summary = facts.summaries.last().map(|raw| BillSummary {
            date: raw.date.clone(),
            summary_as: raw.action_desc.clone(),
            text: html.convert(&raw.html),
        });

        Ok(BillRecord {
            bill_id: facts.identity.bill_id().to_string(),
            bill_type: facts.identity.bill_type(),
            number: facts.identity.number(),
            congress: facts.identity.congress(),
            url: bill_url(&facts.identity),
            introduced_at: facts.introduced_at,
            sponsor: facts.sponsor,
            cosponsors: facts.cosponsors,
            actions: outcome.actions,
            history,
            status: outcome.status,
            status_at,
            titles,
            official_title,
            short_title,
            popular_title,
            summary,
            subjects_top_term: facts.subjects_top_term,
            related_bills: facts.related_bills,
            updated_at: facts.updated_at,
        })
    }
}

/// Convenience wrapper binding the default HTML converter
pub fn bill_record(tree_value: &Value) -> Result<BillRecord> {
    let builder = RecordBuilder::new()?;
    let stripper = TagStripper::new()?;
    builder.build(tree_value, &stripper)
}
