//! Shop Catalog Extractor
//!
//! Renders every store catalog asset (`_StoreCatalog*`) as a wiki price
//! list. A catalog references its store sets by identifier, a set references
//! store items, and a store item references the item for sale, whose
//! `buyValue` times the store markup (rounded up) is the listed price.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::wiki::{sentence_case, Template};
use super::{read_document, resolve_asset_path, scan_assets, write_output};
use super::{ExtractError, ExtractReport, Extractor, Result};
use crate::catalog::Catalog;
use crate::ingestion::AssetDirectory;

/// File-name prefix of store catalog assets.
pub const STORE_CATALOG_PREFIX: &str = "_StoreCatalog";

const LIMITED_NOTE: &str = "limited quantity item. The player can only purchase one.";

// ============================================================================
// Listing Model
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StoreListing {
    pub store_name: String,
    pub markup_percent: f64,
    pub sets: Vec<StoreSetListing>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreSetListing {
    pub file_reference: String,
    /// Present when the set rolls a random subset of its items.
    pub roll_amount: Option<String>,
    pub items: Vec<ShopLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopLine {
    pub name: String,
    pub price: i64,
    pub limited: bool,
}

impl ShopLine {
    pub fn template(&self) -> Template {
        let template = Template::new("shop").arg(&self.name).arg(self.price);
        if self.limited {
            template.named("note", LIMITED_NOTE).spaced_assignments()
        } else {
            template
        }
    }
}

impl StoreListing {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Store Name: {}", self.store_name);
        let _ = writeln!(out, "Markup Percent: {}", format_markup(self.markup_percent));

        for set in &self.sets {
            match &set.roll_amount {
                Some(amount) => {
                    let _ = writeln!(out, "\nStore Set: {} - Roll Amount: {}", set.file_reference, amount);
                }
                None => {
                    let _ = writeln!(out, "\nStore Set: {}", set.file_reference);
                }
            }
            for item in &set.items {
                let _ = writeln!(out, "{}", item.template());
            }
        }
        out
    }
}

/// Whole markups keep one decimal (`1.0`), others print as-is (`1.25`).
fn format_markup(markup: f64) -> String {
    if markup.fract() == 0.0 {
        format!("{markup:.1}")
    } else {
        markup.to_string()
    }
}

// ============================================================================
// Extractor
// ============================================================================

#[derive(Debug, Clone)]
pub struct ShopExtractor {
    input_dir: PathBuf,
    asset_extension: String,
    output_dir: PathBuf,
}

impl ShopExtractor {
    /// Listings are written to `<output_dir>/Shops/<store>.txt`.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        asset_extension: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            asset_extension: asset_extension.into(),
            output_dir: output_dir.into(),
        }
    }

    fn shops_dir(&self) -> PathBuf {
        self.output_dir.join("Shops")
    }

    /// Build the listing for one store catalog asset.
    pub fn listing(
        &self,
        catalog: &Catalog,
        directory: &AssetDirectory,
        file_reference: &str,
        path: &Path,
        report: &mut ExtractReport,
    ) -> Result<StoreListing> {
        let document = read_document(path)?;

        let store_name = document
            .str_field("m_Name")
            .map(|name| name.replace(STORE_CATALOG_PREFIX, ""))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ExtractError::missing_field(file_reference, "m_Name"))?;
        let markup_percent = document.f64_field("markupPercent").unwrap_or(1.0);

        let mut sets = Vec::new();
        for set_guid in document.guid_refs("storeSets") {
            match self.store_set(catalog, directory, &set_guid, markup_percent, report) {
                Ok(set) => sets.push(set),
                Err(e) => report.skip_or_fail(e)?,
            }
        }

        Ok(StoreListing {
            store_name,
            markup_percent,
            sets,
        })
    }

    fn store_set(
        &self,
        catalog: &Catalog,
        directory: &AssetDirectory,
        set_guid: &str,
        markup_percent: f64,
        report: &mut ExtractReport,
    ) -> Result<StoreSetListing> {
        let (file_reference, path) = resolve_asset_path(catalog, directory, set_guid, "store set")?;
        let document = read_document(path)?;

        let roll_amount = document.flag_field("rndRollActive").then(|| {
            document
                .str_field("rndRollAmount")
                .unwrap_or_else(|| "N/A".to_string())
        });

        let mut items = Vec::new();
        for item_guid in document.guid_refs("storeItemsInSet") {
            match self.shop_line(catalog, directory, &item_guid, markup_percent) {
                Ok(line) => items.push(line),
                Err(e) => report.skip_or_fail(e)?,
            }
        }

        Ok(StoreSetListing {
            file_reference: file_reference.to_string(),
            roll_amount,
            items,
        })
    }

    fn shop_line(
        &self,
        catalog: &Catalog,
        directory: &AssetDirectory,
        store_item_guid: &str,
        markup_percent: f64,
    ) -> Result<ShopLine> {
        let (store_item_ref, path) =
            resolve_asset_path(catalog, directory, store_item_guid, "store set item")?;
        let store_item = read_document(path)?;

        let for_sale_guid = store_item
            .guid_ref("itemForSale")
            .ok_or_else(|| ExtractError::missing_field(store_item_ref, "itemForSale"))?;
        let limited = store_item.i64_field("limitedPurchase") == Some(1);

        let (_, for_sale_path) =
            resolve_asset_path(catalog, directory, &for_sale_guid, store_item_ref)?;
        let buy_value = read_document(for_sale_path)?
            .f64_field("buyValue")
            .unwrap_or(0.0);

        let name = sentence_case(catalog.resolve_name(&for_sale_guid));
        let price = (buy_value * markup_percent).ceil() as i64;

        log::debug!("{store_item_ref}: {name} at {price} (buyValue {buy_value} x {markup_percent})");

        Ok(ShopLine {
            name,
            price,
            limited,
        })
    }
}

impl Extractor for ShopExtractor {
    fn name(&self) -> &'static str {
        "shop"
    }

    fn run(&self, catalog: &Catalog) -> Result<ExtractReport> {
        let _span = tracing::info_span!("shop_extractor").entered();

        let directory = scan_assets(&self.input_dir, &self.asset_extension)?;
        let mut report = ExtractReport::default();

        let store_catalogs: Vec<(&str, &Path)> = directory
            .assets()
            .filter(|(file_reference, _)| file_reference.starts_with(STORE_CATALOG_PREFIX))
            .collect();
        log::info!("Found {} store catalogs", store_catalogs.len());

        for (file_reference, path) in store_catalogs {
            let listing = match self.listing(catalog, &directory, file_reference, path, &mut report) {
                Ok(listing) => listing,
                Err(e) => {
                    report.skip_or_fail(e)?;
                    continue;
                }
            };

            let path = self.shops_dir().join(format!("{}.txt", listing.store_name));
            write_output(&path, &listing.render())?;
            report.outputs.push(path);
            report.written += 1;
        }

        Ok(report)
    }
}
