//! Email Extractor
//!
//! Every catalog entry with an `email_` save key is one in-game email. Its
//! subject and body come from the email localization table, its sender and
//! attachments from references inside the email asset.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use super::wiki::{format_body, sentence_case, Template};
use super::{read_asset, scan_assets, write_output};
use super::{ExtractError, ExtractReport, Extractor, Result};
use crate::catalog::{Catalog, CatalogEntry};
use crate::ingestion::{AssetDirectory, LocalizationTable};

/// Save-key prefix of email assets.
pub const EMAIL_KEY_PREFIX: &str = "email_";

const UNKNOWN_TEXT: &str = "unknown";
const UNKNOWN_ITEM: &str = "unknown_item";

static SENDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"npcEmailer:\s*\{fileID: -?\d+, guid: ([a-f0-9]{32}), type: \d+\}")
        .expect("Failed to compile email sender regex")
});

static ATTACHMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)itemData:\s*\{fileID: -?\d+, guid: ([a-f0-9]{32}), type: \d+\}.*?amountOfItem:\s*(\d+)",
    )
    .expect("Failed to compile email attachment regex")
});

// ============================================================================
// Asset References
// ============================================================================

/// Identifiers an email asset points at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailReferences {
    pub sender: Option<String>,
    /// `(item identifier, amount)` in asset order.
    pub attachments: Vec<(String, u32)>,
}

impl EmailReferences {
    pub fn scan(asset_text: &str) -> Self {
        let sender = SENDER_PATTERN
            .captures(asset_text)
            .map(|caps| caps[1].to_string());

        let attachments = ATTACHMENT_PATTERN
            .captures_iter(asset_text)
            .filter_map(|caps| {
                let amount = caps[2].parse().ok()?;
                Some((caps[1].to_string(), amount))
            })
            .collect();

        Self {
            sender,
            attachments,
        }
    }
}

// ============================================================================
// Extractor
// ============================================================================

#[derive(Debug, Clone)]
pub struct EmailExtractor {
    input_dir: PathBuf,
    asset_extension: String,
    localization_file: PathBuf,
    output_dir: PathBuf,
}

impl EmailExtractor {
    /// Emails are written to `<output_dir>/Emails/all_emails.txt`.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        asset_extension: impl Into<String>,
        localization_file: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            asset_extension: asset_extension.into(),
            localization_file: localization_file.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join("Emails").join("all_emails.txt")
    }

    /// Render one email as a `{{Mail}}` block.
    ///
    /// A missing or unreadable asset leaves the sender unknown and the gift
    /// list empty; the email is still rendered.
    pub fn render_email(
        &self,
        catalog: &Catalog,
        directory: &AssetDirectory,
        localization: &LocalizationTable,
        entry: &CatalogEntry,
    ) -> String {
        let semantic_key = entry.semantic_key.as_deref().unwrap_or_default();
        let record = localization.get(semantic_key);
        if record.is_none() {
            log::warn!("No localization for {semantic_key}");
        }
        let subject = record
            .and_then(|r| r.get("emailSubject"))
            .unwrap_or(UNKNOWN_TEXT);
        let body = record
            .and_then(|r| r.get("emailBody"))
            .unwrap_or(UNKNOWN_TEXT);

        let references = match directory.asset_path(&entry.file_reference) {
            Some(path) => match read_asset(path) {
                Ok(text) => EmailReferences::scan(&text),
                Err(e) => {
                    log::warn!("{e}; rendering without sender or gifts");
                    EmailReferences::default()
                }
            },
            None => {
                log::warn!("No asset file for email {}", entry.file_reference);
                EmailReferences::default()
            }
        };

        let sender = references
            .sender
            .as_deref()
            .and_then(|guid| catalog.entry_by_identifier(guid))
            .map_or(UNKNOWN_TEXT, |sender| sender.display_name.as_str());

        let gift = references
            .attachments
            .iter()
            .map(|(guid, amount)| {
                let name = catalog
                    .entry_by_identifier(guid)
                    .map_or(UNKNOWN_ITEM, |item| item.display_name.as_str());
                if name == UNKNOWN_ITEM {
                    log::warn!("Unresolved attachment {guid} in {}", entry.file_reference);
                }
                match amount {
                    1 => sentence_case(name),
                    n => format!("{}*{n}", sentence_case(name)),
                }
            })
            .collect::<Vec<_>>()
            .join("; ");

        log::debug!(
            "{}: sender {sender}, {} attachments",
            entry.file_reference,
            references.attachments.len()
        );

        Template::new("Mail")
            .named("collapse", "true")
            .named("trigger", &entry.file_reference)
            .named("npc", sentence_case(sender))
            .named("subject", sentence_case(subject))
            .named("gift", gift)
            .named("emailBody", format_body(body))
            .render_block(2)
    }
}

impl Extractor for EmailExtractor {
    fn name(&self) -> &'static str {
        "email"
    }

    fn run(&self, catalog: &Catalog) -> Result<ExtractReport> {
        let _span = tracing::info_span!("email_extractor").entered();

        let localization = LocalizationTable::load(&self.localization_file)
            .map_err(|e| ExtractError::localization_unreadable(&self.localization_file, e))?;
        let directory = scan_assets(&self.input_dir, &self.asset_extension)?;
        let mut report = ExtractReport::default();

        let emails: Vec<String> = catalog
            .entries_with_key_prefix(EMAIL_KEY_PREFIX)
            .map(|entry| self.render_email(catalog, &directory, &localization, entry))
            .collect();
        log::info!("Rendered {} emails", emails.len());

        let path = self.output_path();
        write_output(&path, &emails.join("\n\n"))?;
        report.written = emails.len();
        report.outputs.push(path);

        Ok(report)
    }
}
