//! Extension and directory tables used to classify ROM files.
//!
//! Most extensions belong to exactly one system. A handful (`.bin`, `.cue`,
//! `.iso`, `.chd`, `.zip`) are shared between systems; for those the
//! containing directory decides, using a [`DirectoryTable`] that maps folder
//! names to systems. The table is consulted once per directory by the
//! scanner, never per file.

use std::collections::HashMap;
use std::path::Path;

use crate::system::System;

/// How one file extension maps to a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRule {
    /// Lowercase extension without the leading dot.
    pub extension: &'static str,
    /// System used when no directory hint applies.
    pub default: System,
    /// Other systems a directory hint may select for this extension.
    pub alternatives: &'static [System],
}

impl ExtensionRule {
    const fn single(extension: &'static str, system: System) -> Self {
        Self {
            extension,
            default: system,
            alternatives: &[],
        }
    }

    const fn shared(
        extension: &'static str,
        default: System,
        alternatives: &'static [System],
    ) -> Self {
        Self {
            extension,
            default,
            alternatives,
        }
    }

    /// True if more than one system uses this extension.
    pub fn is_ambiguous(&self) -> bool {
        !self.alternatives.is_empty()
    }

    /// Whether `system` is a legal outcome for this extension.
    pub fn accepts(&self, system: System) -> bool {
        self.default == system || self.alternatives.contains(&system)
    }

    /// Pick the system for a file with this extension given the directory hint.
    ///
    /// A hint only counts when it names one of the rule's systems; a `.nes`
    /// file inside a `psx/` folder is still a NES game.
    pub fn resolve(&self, hint: Option<System>) -> System {
        match hint {
            Some(system) if self.accepts(system) => system,
            _ => self.default,
        }
    }
}

const EXTENSION_RULES: &[ExtensionRule] = &[
    // Nintendo
    ExtensionRule::single("nes", System::Nes),
    ExtensionRule::single("sfc", System::Snes),
    ExtensionRule::single("smc", System::Snes),
    ExtensionRule::single("gba", System::Gba),
    ExtensionRule::single("gb", System::GameBoy),
    ExtensionRule::single("gbc", System::GameBoyColor),
    ExtensionRule::single("vb", System::VirtualBoy),
    ExtensionRule::single("nds", System::Ds),
    ExtensionRule::single("z64", System::N64),
    ExtensionRule::single("n64", System::N64),
    ExtensionRule::single("v64", System::N64),
    // Sega
    ExtensionRule::single("md", System::MegaDrive),
    ExtensionRule::single("gen", System::MegaDrive),
    ExtensionRule::single("gg", System::GameGear),
    ExtensionRule::single("sms", System::MasterSystem),
    ExtensionRule::single("32x", System::Sega32x),
    ExtensionRule::single("sat", System::Saturn),
    // Sony
    ExtensionRule::single("pbp", System::Ps1),
    ExtensionRule::single("mcr", System::Ps1),
    ExtensionRule::single("psp", System::Psp),
    ExtensionRule::single("cso", System::Psp),
    // Atari
    ExtensionRule::single("a26", System::Atari2600),
    ExtensionRule::single("a52", System::Atari5200),
    ExtensionRule::single("a78", System::Atari7800),
    ExtensionRule::single("lnx", System::Lynx),
    ExtensionRule::single("j64", System::Jaguar),
    // Others
    ExtensionRule::single("3do", System::ThreeDo),
    ExtensionRule::single("pce", System::PcEngine),
    ExtensionRule::single("sgx", System::PcEngine),
    ExtensionRule::single("ngp", System::NeoGeoPocket),
    ExtensionRule::single("ngc", System::NeoGeoPocket),
    ExtensionRule::single("npc", System::NeoGeoPocket),
    ExtensionRule::single("ws", System::WonderSwan),
    ExtensionRule::single("wsc", System::WonderSwan),
    ExtensionRule::single("col", System::ColecoVision),
    ExtensionRule::single("adf", System::Amiga),
    ExtensionRule::single("d64", System::C64),
    // Shared between systems
    ExtensionRule::shared(
        "bin",
        System::MegaDrive,
        &[System::Ps1, System::SegaCd, System::Saturn],
    ),
    ExtensionRule::shared("cue", System::SegaCd, &[System::Ps1, System::Saturn]),
    ExtensionRule::shared(
        "iso",
        System::Ps1,
        &[System::Psp, System::SegaCd, System::Saturn, System::ThreeDo],
    ),
    ExtensionRule::shared("chd", System::Ps1, &[System::SegaCd, System::Saturn]),
    ExtensionRule::shared("zip", System::Arcade, &[System::NeoGeo]),
];

/// Look up the rule for an extension (case-insensitive, leading dot optional).
pub fn extension_rule(extension: &str) -> Option<&'static ExtensionRule> {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    EXTENSION_RULES
        .iter()
        .find(|rule| rule.extension.eq_ignore_ascii_case(ext))
}

/// Extension rule for a file path, if its extension is known.
pub fn rule_for_path(path: &Path) -> Option<&'static ExtensionRule> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(extension_rule)
}

/// All rules, in table order.
pub fn extension_rules() -> &'static [ExtensionRule] {
    EXTENSION_RULES
}

/// Extensions that can resolve to `system`, including shared ones.
pub fn extensions_for(system: System) -> Vec<&'static str> {
    EXTENSION_RULES
        .iter()
        .filter(|rule| rule.accepts(system))
        .map(|rule| rule.extension)
        .collect()
}

/// Maps directory names to systems.
///
/// The default table knows every system alias (`psx`, `playstation`,
/// `neogeo`, ...). Extra names can be registered from configuration.
/// Matching is on whole path components, case-insensitively.
#[derive(Debug, Clone)]
pub struct DirectoryTable {
    entries: HashMap<String, System>,
}

impl Default for DirectoryTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for &system in System::all() {
            for alias in system.aliases() {
                table.insert(alias, system);
            }
        }
        table
    }
}

impl DirectoryTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register (or replace) a directory name.
    pub fn insert(&mut self, dir_name: &str, system: System) {
        self.entries.insert(dir_name.trim().to_lowercase(), system);
    }

    /// System named by a single directory component.
    pub fn lookup(&self, dir_name: &str) -> Option<System> {
        self.entries.get(&dir_name.trim().to_lowercase()).copied()
    }

    /// System hinted by a directory path: the deepest component that names
    /// a system wins.
    pub fn system_for_path(&self, dir: &Path) -> Option<System> {
        dir.components()
            .rev()
            .filter_map(|c| c.as_os_str().to_str())
            .find_map(|name| self.lookup(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify a file given the system hinted by its directory.
///
/// Returns `None` for unrecognized extensions.
pub fn classify(path: &Path, hint: Option<System>) -> Option<System> {
    rule_for_path(path).map(|rule| rule.resolve(hint))
}
