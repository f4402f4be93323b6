use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Emulated systems the web player can launch.
///
/// Each system carries the tag the player expects in the manifest, the
/// emulator core that runs it, and the thumbnail collections that hold its
/// box art, so the rest of the workspace never matches on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum System {
    // Nintendo
    Nes,
    Snes,
    N64,
    GameBoy,
    GameBoyColor,
    Gba,
    Ds,
    VirtualBoy,

    // Sega
    MegaDrive,
    MasterSystem,
    GameGear,
    SegaCd,
    Sega32x,
    Saturn,

    // Sony
    Ps1,
    Psp,

    // Atari
    Atari2600,
    Atari5200,
    Atari7800,
    Lynx,
    Jaguar,

    // Arcade / SNK
    Arcade,
    NeoGeo,
    NeoGeoPocket,

    // Others
    PcEngine,
    WonderSwan,
    ColecoVision,
    ThreeDo,
    Amiga,
    C64,
}

/// All system variants in registration order.
const ALL_SYSTEMS: &[System] = &[
    System::Nes,
    System::Snes,
    System::N64,
    System::GameBoy,
    System::GameBoyColor,
    System::Gba,
    System::Ds,
    System::VirtualBoy,
    System::MegaDrive,
    System::MasterSystem,
    System::GameGear,
    System::SegaCd,
    System::Sega32x,
    System::Saturn,
    System::Ps1,
    System::Psp,
    System::Atari2600,
    System::Atari5200,
    System::Atari7800,
    System::Lynx,
    System::Jaguar,
    System::Arcade,
    System::NeoGeo,
    System::NeoGeoPocket,
    System::PcEngine,
    System::WonderSwan,
    System::ColecoVision,
    System::ThreeDo,
    System::Amiga,
    System::C64,
];

impl System {
    /// Identifier written to the manifest's `system` field and used as the
    /// asset subdirectory name.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Nes => "nes",
            Self::Snes => "snes",
            Self::N64 => "n64",
            Self::GameBoy => "gb",
            Self::GameBoyColor => "gbc",
            Self::Gba => "gba",
            Self::Ds => "nds",
            Self::VirtualBoy => "vb",
            Self::MegaDrive => "segaMD",
            Self::MasterSystem => "segaMS",
            Self::GameGear => "segaGG",
            Self::SegaCd => "segaCD",
            Self::Sega32x => "sega32x",
            Self::Saturn => "segaSaturn",
            Self::Ps1 => "psx",
            Self::Psp => "psp",
            Self::Atari2600 => "atari2600",
            Self::Atari5200 => "atari5200",
            Self::Atari7800 => "atari7800",
            Self::Lynx => "lynx",
            Self::Jaguar => "jaguar",
            Self::Arcade => "arcade",
            Self::NeoGeo => "neogeo",
            Self::NeoGeoPocket => "ngp",
            Self::PcEngine => "pce",
            Self::WonderSwan => "wswan",
            Self::ColecoVision => "coleco",
            Self::ThreeDo => "3do",
            Self::Amiga => "amiga",
            Self::C64 => "c64",
        }
    }

    /// Full display name for the system.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nes => "Nintendo Entertainment System",
            Self::Snes => "Super Nintendo Entertainment System",
            Self::N64 => "Nintendo 64",
            Self::GameBoy => "Game Boy",
            Self::GameBoyColor => "Game Boy Color",
            Self::Gba => "Game Boy Advance",
            Self::Ds => "Nintendo DS",
            Self::VirtualBoy => "Virtual Boy",
            Self::MegaDrive => "Sega Mega Drive / Genesis",
            Self::MasterSystem => "Sega Master System",
            Self::GameGear => "Sega Game Gear",
            Self::SegaCd => "Sega CD / Mega-CD",
            Self::Sega32x => "Sega 32X",
            Self::Saturn => "Sega Saturn",
            Self::Ps1 => "Sony PlayStation",
            Self::Psp => "Sony PlayStation Portable",
            Self::Atari2600 => "Atari 2600",
            Self::Atari5200 => "Atari 5200",
            Self::Atari7800 => "Atari 7800",
            Self::Lynx => "Atari Lynx",
            Self::Jaguar => "Atari Jaguar",
            Self::Arcade => "Arcade",
            Self::NeoGeo => "SNK Neo Geo",
            Self::NeoGeoPocket => "SNK Neo Geo Pocket",
            Self::PcEngine => "PC Engine / TurboGrafx-16",
            Self::WonderSwan => "Bandai WonderSwan",
            Self::ColecoVision => "ColecoVision",
            Self::ThreeDo => "3DO Interactive Multiplayer",
            Self::Amiga => "Commodore Amiga",
            Self::C64 => "Commodore 64",
        }
    }

    /// Emulator core the web player loads for this system.
    pub fn core(&self) -> &'static str {
        match self {
            Self::Nes => "fceumm",
            Self::Snes => "snes9x",
            Self::N64 => "mupen64plus_next",
            Self::GameBoy | Self::GameBoyColor => "gambatte",
            Self::Gba => "mgba",
            Self::Ds => "melonds",
            Self::VirtualBoy => "beetle_vb",
            Self::MegaDrive | Self::GameGear | Self::SegaCd => "genesis_plus_gx",
            Self::MasterSystem => "smsplus",
            Self::Sega32x => "picodrive",
            Self::Saturn => "yabause",
            Self::Ps1 => "pcsx_rearmed",
            Self::Psp => "ppsspp",
            Self::Atari2600 => "stella2014",
            Self::Atari5200 => "a5200",
            Self::Atari7800 => "prosystem",
            Self::Lynx => "handy",
            Self::Jaguar => "virtualjaguar",
            Self::Arcade | Self::NeoGeo => "fbneo",
            Self::NeoGeoPocket => "mednafen_ngp",
            Self::PcEngine => "mednafen_pce",
            Self::WonderSwan => "mednafen_wswan",
            Self::ColecoVision => "gearcoleco",
            Self::ThreeDo => "opera",
            Self::Amiga => "puae",
            Self::C64 => "vice_x64sc",
        }
    }

    /// Thumbnail collections holding box art for this system, in the order
    /// they should be searched. The first collection that yields a match wins.
    pub fn thumbnail_collections(&self) -> &'static [&'static str] {
        match self {
            Self::Nes => &["Nintendo_-_Nintendo_Entertainment_System"],
            Self::Snes => &["Nintendo_-_Super_Nintendo_Entertainment_System"],
            Self::N64 => &["Nintendo_-_Nintendo_64"],
            Self::GameBoy => &["Nintendo_-_Game_Boy"],
            Self::GameBoyColor => &["Nintendo_-_Game_Boy_Color", "Nintendo_-_Game_Boy"],
            Self::Gba => &["Nintendo_-_Game_Boy_Advance"],
            Self::Ds => &["Nintendo_-_Nintendo_DS"],
            Self::VirtualBoy => &["Nintendo_-_Virtual_Boy"],
            Self::MegaDrive => &["Sega_-_Mega_Drive_-_Genesis"],
            Self::MasterSystem => &["Sega_-_Master_System_-_Mark_III"],
            Self::GameGear => &["Sega_-_Game_Gear"],
            Self::SegaCd => &["Sega_-_Mega-CD_-_Sega_CD"],
            Self::Sega32x => &["Sega_-_32X"],
            Self::Saturn => &["Sega_-_Saturn"],
            Self::Ps1 => &["Sony_-_PlayStation"],
            Self::Psp => &["Sony_-_PlayStation_Portable"],
            Self::Atari2600 => &["Atari_-_2600"],
            Self::Atari5200 => &["Atari_-_5200"],
            Self::Atari7800 => &["Atari_-_7800"],
            Self::Lynx => &["Atari_-_Lynx"],
            Self::Jaguar => &["Atari_-_Jaguar"],
            Self::Arcade => &["FBNeo_-_Arcade_Games", "MAME"],
            Self::NeoGeo => &["SNK_-_Neo_Geo", "FBNeo_-_Arcade_Games"],
            Self::NeoGeoPocket => &["SNK_-_Neo_Geo_Pocket", "SNK_-_Neo_Geo_Pocket_Color"],
            Self::PcEngine => &["NEC_-_PC_Engine_-_TurboGrafx_16"],
            Self::WonderSwan => &["Bandai_-_WonderSwan", "Bandai_-_WonderSwan_Color"],
            Self::ColecoVision => &["Coleco_-_ColecoVision"],
            Self::ThreeDo => &["The_3DO_Company_-_3DO"],
            Self::Amiga => &["Commodore_-_Amiga"],
            Self::C64 => &["Commodore_-_64"],
        }
    }

    /// All accepted names for this system (case-insensitive matching).
    ///
    /// The first alias is always the lowercased tag. The same list is used
    /// for CLI arguments and for recognizing per-system ROM folders.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Nes => &["nes", "famicom", "fc"],
            Self::Snes => &["snes", "sfc", "super famicom", "super nintendo"],
            Self::N64 => &["n64", "nintendo64", "nintendo 64"],
            Self::GameBoy => &["gb", "gameboy", "game boy"],
            Self::GameBoyColor => &["gbc", "gameboy color", "game boy color"],
            Self::Gba => &["gba", "game boy advance", "gameboy advance"],
            Self::Ds => &["nds", "ds", "nintendo ds"],
            Self::VirtualBoy => &["vb", "virtualboy", "virtual boy"],
            Self::MegaDrive => &[
                "segamd",
                "sega_md",
                "genesis",
                "megadrive",
                "mega drive",
                "md",
            ],
            Self::MasterSystem => &["segams", "sega_ms", "sms", "mastersystem", "master system"],
            Self::GameGear => &["segagg", "sega_gg", "gamegear", "game gear", "gg"],
            Self::SegaCd => &["segacd", "sega_cd", "sega cd", "megacd", "mega cd"],
            Self::Sega32x => &["sega32x", "sega_32x", "32x"],
            Self::Saturn => &["segasaturn", "saturn", "sega saturn"],
            Self::Ps1 => &["psx", "ps1", "playstation", "playstation1"],
            Self::Psp => &["psp", "playstation portable"],
            Self::Atari2600 => &["atari2600", "a2600", "2600"],
            Self::Atari5200 => &["atari5200", "a5200", "5200"],
            Self::Atari7800 => &["atari7800", "a7800", "7800"],
            Self::Lynx => &["lynx", "atari lynx"],
            Self::Jaguar => &["jaguar", "atari jaguar"],
            Self::Arcade => &["arcade", "fbneo", "mame"],
            Self::NeoGeo => &["neogeo", "neo geo", "neo-geo", "mvs", "aes"],
            Self::NeoGeoPocket => &["ngp", "ngpc", "neo geo pocket"],
            Self::PcEngine => &["pce", "pcengine", "pc engine", "turbografx", "tg16"],
            Self::WonderSwan => &["wswan", "wonderswan", "ws", "wsc"],
            Self::ColecoVision => &["coleco", "colecovision"],
            Self::ThreeDo => &["3do"],
            Self::Amiga => &["amiga"],
            Self::C64 => &["c64", "commodore64", "commodore 64"],
        }
    }

    /// All 30 system variants.
    pub fn all() -> &'static [System] {
        ALL_SYSTEMS
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `System`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown system: '{0}'")]
pub struct SystemParseError(pub String);

impl std::str::FromStr for System {
    type Err = SystemParseError;

    /// Parse a system from its tag or any alias (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_SYSTEMS
            .iter()
            .copied()
            .find(|system| {
                system.tag().to_lowercase() == lower
                    || system.aliases().iter().any(|alias| *alias == lower)
            })
            .ok_or_else(|| SystemParseError(s.to_string()))
    }
}

impl Serialize for System {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for System {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "tests/system_tests.rs"]
mod tests;
