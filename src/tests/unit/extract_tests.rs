//! Extractor Scenarios
//!
//! Each scenario builds a catalog from a fixture dump, then runs an
//! extractor against it and checks the written wiki text.

use std::fs;

use crate::catalog::{Catalog, CatalogBuilder};
use crate::extract::{EmailExtractor, ExtractError, Extractor, ShopExtractor};
use crate::tests::common::*;

fn build_catalog(dump: &AssetDump) -> Catalog {
    CatalogBuilder::default()
        .build(dump.input_dir(), dump.empty_localization())
        .unwrap()
        .catalog
}

// ============================================================================
// Shops
// ============================================================================

const STORE_ID: &str = "c1000000000000000000000000000000";
const SEEDS_SET_ID: &str = "c2000000000000000000000000000000";
const TOOLS_SET_ID: &str = "c3000000000000000000000000000000";
const CARROT_STORE_ITEM_ID: &str = "c4000000000000000000000000000000";
const HOE_STORE_ITEM_ID: &str = "c5000000000000000000000000000000";
const CARROT_ID: &str = "c6000000000000000000000000000000";
const HOE_ID: &str = "c7000000000000000000000000000000";
const MISSING_ID: &str = "c9999999999999999999999999999999";

fn general_store() -> AssetDump {
    let dump = AssetDump::new();
    dump.asset_with_meta(
        "_StoreCatalogGeneral",
        STORE_ID,
        &format!(
            "  m_Name: _StoreCatalogGeneral\n  markupPercent: 1.5\n  storeSets:\n  - {}\n  - {}\n",
            reference(SEEDS_SET_ID),
            reference(TOOLS_SET_ID)
        ),
    )
    .asset_with_meta(
        "GeneralSeeds",
        SEEDS_SET_ID,
        &format!(
            "  m_Name: GeneralSeeds\n  rndRollActive: 1\n  rndRollAmount: 3\n  storeItemsInSet:\n  - {}\n  - {}\n",
            reference(CARROT_STORE_ITEM_ID),
            reference(MISSING_ID)
        ),
    )
    .asset_with_meta(
        "GeneralTools",
        TOOLS_SET_ID,
        &format!(
            "  m_Name: GeneralTools\n  rndRollActive: 0\n  storeItemsInSet:\n  - {}\n",
            reference(HOE_STORE_ITEM_ID)
        ),
    )
    .asset_with_meta(
        "StoreItemCarrot",
        CARROT_STORE_ITEM_ID,
        &format!("  m_Name: StoreItemCarrot\n  itemForSale: {}\n  limitedPurchase: 0\n", reference(CARROT_ID)),
    )
    .asset_with_meta(
        "StoreItemHoe",
        HOE_STORE_ITEM_ID,
        &format!("  m_Name: StoreItemHoe\n  itemForSale: {}\n  limitedPurchase: 1\n", reference(HOE_ID)),
    )
    .asset_with_meta(
        "carrot_seeds",
        CARROT_ID,
        "  m_Name: carrot_seeds\n  itemName: CARROT SEEDS\n  saveID: item_101\n  buyValue: 9\n",
    )
    .asset_with_meta(
        "golden_hoe",
        HOE_ID,
        "  m_Name: golden_hoe\n  itemName: Golden Hoe\n  saveID: item_102\n  buyValue: 599.5\n",
    );
    dump
}

#[test]
fn test_shop_price_list() {
    let dump = general_store();
    build_catalog(&dump).save(dump.catalog_path()).unwrap();
    let catalog = Catalog::load(dump.catalog_path()).unwrap();

    let extractor = ShopExtractor::new(dump.input_dir(), "asset", dump.output_dir());
    let report = extractor.run(&catalog).unwrap();

    let path = dump.output_dir().join("Shops").join("General.txt");
    assert_eq!(report.outputs, vec![path.clone()]);
    assert_eq!(report.written, 1);
    // the dangling store item in GeneralSeeds
    assert_eq!(report.skipped, 1);

    assert_eq!(
        fs::read_to_string(path).unwrap(),
        "Store Name: General\n\
         Markup Percent: 1.5\n\
         \n\
         Store Set: GeneralSeeds - Roll Amount: 3\n\
         {{shop|Carrot seeds|14}}\n\
         \n\
         Store Set: GeneralTools\n\
         {{shop|Golden hoe|900|note = limited quantity item. The player can only purchase one.}}\n"
    );
}

#[test]
fn test_store_without_name_is_skipped() {
    let dump = AssetDump::new();
    dump.asset_with_meta("_StoreCatalogBlank", STORE_ID, "  markupPercent: 1\n");
    let catalog = build_catalog(&dump);

    let report = ShopExtractor::new(dump.input_dir(), "asset", dump.output_dir())
        .run(&catalog)
        .unwrap();
    assert_eq!(report.written, 0);
    assert_eq!(report.skipped, 1);
    assert!(report.outputs.is_empty());
}

#[test]
fn test_shop_extractor_missing_input_dir() {
    let dump = AssetDump::new();
    let err = ShopExtractor::new(dump.root().join("gone"), "asset", dump.output_dir())
        .run(&Catalog::default())
        .unwrap_err();
    assert!(matches!(err, ExtractError::InputDirUnreadable { .. }));
}

// ============================================================================
// Emails
// ============================================================================

const MAYOR_ID: &str = "a1000000000000000000000000000000";
const WELCOME_ID: &str = "a2000000000000000000000000000000";
const NOTICE_ID: &str = "a3000000000000000000000000000000";

fn mail_dump() -> AssetDump {
    let dump = AssetDump::new();
    dump.asset_with_meta("Mayor", MAYOR_ID, "  m_Name: MAYOR\n")
        .asset_with_meta(
            "carrot_seeds",
            CARROT_ID,
            "  m_Name: carrot_seeds\n  itemName: Carrot Seeds\n  saveID: item_101\n",
        )
        .asset_with_meta(
            "golden_hoe",
            HOE_ID,
            "  m_Name: golden_hoe\n  itemName: Golden Hoe\n  saveID: item_102\n",
        )
        .asset_with_meta(
            "WelcomeMail",
            WELCOME_ID,
            &format!(
                "  m_Name: WelcomeMail\n  saveID: email_welcome\n  npcEmailer: {}\n  itemsToAttach:\n  - itemData: {}\n    amountOfItem: 5\n  - itemData: {}\n    amountOfItem: 1\n",
                reference(MAYOR_ID),
                reference(CARROT_ID),
                reference(HOE_ID)
            ),
        )
        .asset_with_meta("NoticeMail", NOTICE_ID, "  m_Name: NoticeMail\n  saveID: email_notice\n");
    dump
}

const EMAILS: &str = r#"
//EMAIL_WELCOME
{ "emailKey": "email_welcome", "emailSubject": "WELCOME to town", "emailBody": "Hi $playerName,\nEnjoy the seeds.\n-Mayor" }
"#;

#[test]
fn test_email_blocks() {
    let dump = mail_dump();
    let catalog = build_catalog(&dump);
    let localization = dump.localization("English_Emails.txt", EMAILS);

    let extractor = EmailExtractor::new(dump.input_dir(), "asset", localization, dump.output_dir());
    let report = extractor.run(&catalog).unwrap();
    assert_eq!(report.written, 2);
    assert_eq!(report.skipped, 0);

    // catalog order follows file names: upper case sorts first
    let text = fs::read_to_string(extractor.output_path()).unwrap();
    assert_eq!(
        text,
        "{{Mail|collapse=true|trigger=NoticeMail\n\
         |npc=Unknown\n\
         |subject=Unknown\n\
         |gift=\n\
         |emailBody=unknown }}\
         \n\n\
         {{Mail|collapse=true|trigger=WelcomeMail\n\
         |npc=Mayor\n\
         |subject=Welcome to town\n\
         |gift=Carrot seeds*5; Golden hoe\n\
         |emailBody=Hi [PLAYER],<br>Enjoy the seeds.<br>-Mayor }}"
    );
}

#[test]
fn test_unreadable_email_asset_is_rendered_once() {
    let dump = mail_dump();
    let catalog = build_catalog(&dump);
    let localization = dump.localization("English_Emails.txt", EMAILS);
    // not UTF-8, so the asset text cannot be read
    dump.write("WelcomeMail.asset", &[0xff, 0xfe, 0x00, 0xc3]);

    let extractor = EmailExtractor::new(dump.input_dir(), "asset", localization, dump.output_dir());
    let report = extractor.run(&catalog).unwrap();
    assert_eq!(report.written, 2);
    assert_eq!(report.skipped, 0);

    let text = fs::read_to_string(extractor.output_path()).unwrap();
    assert!(text.contains(
        "trigger=WelcomeMail\n\
         |npc=Unknown\n\
         |subject=Welcome to town\n\
         |gift=\n"
    ));
}

#[test]
fn test_email_missing_localization_is_fatal() {
    let dump = mail_dump();
    let catalog = build_catalog(&dump);

    let extractor = EmailExtractor::new(
        dump.input_dir(),
        "asset",
        dump.root().join("TextAsset/English_Emails.txt"),
        dump.output_dir(),
    );
    let err = extractor.run(&catalog).unwrap_err();
    assert!(matches!(err, ExtractError::LocalizationUnreadable { .. }));
    assert!(!extractor.output_path().exists());
}

#[test]
fn test_extractor_names() {
    let dump = AssetDump::new();
    assert_eq!(ShopExtractor::new(dump.input_dir(), "asset", dump.output_dir()).name(), "shop");
    assert_eq!(
        EmailExtractor::new(dump.input_dir(), "asset", dump.empty_localization(), dump.output_dir()).name(),
        "email"
    );
}
