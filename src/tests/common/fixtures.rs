//! Test Fixtures
//!
//! Builds throwaway asset dumps on disk: primary assets, companion metadata
//! files and localization tables laid out the way an engine export does.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

// =============================================================================
// Asset Text
// =============================================================================

const ASSET_HEADER: &str = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n--- !u!114 &11400000\n";

/// Primary asset text with the given `MonoBehaviour` fields (already indented).
pub fn asset_text(body: &str) -> String {
    format!(
        "{ASSET_HEADER}MonoBehaviour:\n  m_ObjectHideFlags: 0\n  m_Script: {{fileID: 11500000, guid: 75d018639740c96f72f68400654af916, type: 3}}\n{body}"
    )
}

/// Companion metadata text carrying `identifier`.
pub fn meta_text(identifier: &str) -> String {
    format!(
        "fileFormatVersion: 2\nguid: {identifier}\nNativeFormatImporter:\n  externalObjects: {{}}\n  mainObjectFileID: 11400000\n"
    )
}

/// An object reference as serialized inside assets.
pub fn reference(identifier: &str) -> String {
    format!("{{fileID: 11400000, guid: {identifier}, type: 2}}")
}

/// A 32-char identifier made of one repeated hex digit.
pub fn identifier(digit: char) -> String {
    std::iter::repeat(digit).take(32).collect()
}

// =============================================================================
// Asset Dump
// =============================================================================

/// A temporary asset dump. The directory lives as long as the value.
pub struct AssetDump {
    temp_dir: TempDir,
}

impl AssetDump {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(temp_dir.path().join("MonoBehaviour")).expect("Failed to create input dir");
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root().join("MonoBehaviour")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("Output")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.output_dir().join("guid_lookup.json")
    }

    /// Write `<file_reference>.asset` with the given fields.
    pub fn asset(&self, file_reference: &str, body: &str) -> &Self {
        self.write(&format!("{file_reference}.asset"), asset_text(body).as_bytes())
    }

    /// Write `<file_reference>.asset.meta` carrying `identifier`.
    pub fn meta(&self, file_reference: &str, identifier: &str) -> &Self {
        self.write(&format!("{file_reference}.asset.meta"), meta_text(identifier).as_bytes())
    }

    /// Write both the asset and its metadata companion.
    pub fn asset_with_meta(&self, file_reference: &str, identifier: &str, body: &str) -> &Self {
        self.asset(file_reference, body).meta(file_reference, identifier)
    }

    /// Write a file relative to the input directory.
    pub fn write(&self, relative: &str, contents: &[u8]) -> &Self {
        let path = self.input_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        fs::write(&path, contents).expect("Failed to write fixture");
        self
    }

    /// Write a localization table under `TextAsset/` and return its path.
    pub fn localization(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.root().join("TextAsset").join(file_name);
        fs::create_dir_all(path.parent().expect("fixture path has a parent"))
            .expect("Failed to create TextAsset dir");
        fs::write(&path, contents).expect("Failed to write localization fixture");
        path
    }

    /// An item localization table with no records.
    pub fn empty_localization(&self) -> PathBuf {
        self.localization("English_Items.txt", "")
    }
}

impl Default for AssetDump {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Scenario Fixtures
// =============================================================================

pub const SWORD_ID: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const SHIELD_ID: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// `sword` (item name, save key) and `shield` (object name only).
pub fn sword_and_shield() -> AssetDump {
    let dump = AssetDump::new();
    dump.asset_with_meta(
        "sword",
        SWORD_ID,
        "  m_Name: sword\n  itemName: Iron Sword\n  saveID: item_042\n  itemCategory: Weapon\n",
    )
    .asset_with_meta("shield", SHIELD_ID, "  m_Name: WoodenShield\n");
    dump
}
