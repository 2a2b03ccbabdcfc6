//! The ROM slot tables.
//!
//! Machine and peripheral ROMs live in two separate index spaces. Consumers address slots by
//! position, so entries are only ever appended to the tables below, never reordered or removed.
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use log::*;

use crate::core::{Settings, SettingsError};

macro_rules! rom_table {
    (
        $(#[$meta: meta])*
        $table: ident {
            $( $variant: ident => $field: ident, $description: literal; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $table {
            $( $variant, )*
        }

        impl $table {
            /// Every slot, in index order.
            pub const ALL: &'static [$table] = &[$( $table::$variant, )*];

            pub fn index(self) -> usize {
                self as usize
            }
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }
            /// Name of the text setting holding this slot's ROM path.
            pub fn setting_name(self) -> &'static str {
                match self {
                    $( $table::$variant => stringify!($field), )*
                }
            }
            /// Human readable name of the ROM.
            pub fn description(self) -> &'static str {
                match self {
                    $( $table::$variant => $description, )*
                }
            }
            pub fn path(self, settings: &Settings) -> &Option<String> {
                match self {
                    $( $table::$variant => &settings.$field, )*
                }
            }
            pub fn path_mut(self, settings: &mut Settings) -> &mut Option<String> {
                match self {
                    $( $table::$variant => &mut settings.$field, )*
                }
            }
        }
    };
}

rom_table! {
    /// A ROM used by one of the emulated machines.
    MachineRom {
        Spectrum16 => rom_16_0, "16K ROM";
        Spectrum48 => rom_48_0, "48K ROM";
        Spectrum128Rom0 => rom_128_0, "128K ROM 0";
        Spectrum128Rom1 => rom_128_1, "128K ROM 1";
        Plus2Rom0 => rom_plus2_0, "+2 ROM 0";
        Plus2Rom1 => rom_plus2_1, "+2 ROM 1";
        Plus2ARom0 => rom_plus2a_0, "+2A ROM 0";
        Plus2ARom1 => rom_plus2a_1, "+2A ROM 1";
        Plus2ARom2 => rom_plus2a_2, "+2A ROM 2";
        Plus2ARom3 => rom_plus2a_3, "+2A ROM 3";
        Plus3Rom0 => rom_plus3_0, "+3 ROM 0";
        Plus3Rom1 => rom_plus3_1, "+3 ROM 1";
        Plus3Rom2 => rom_plus3_2, "+3 ROM 2";
        Plus3Rom3 => rom_plus3_3, "+3 ROM 3";
        Plus3ERom0 => rom_plus3e_0, "+3e ROM 0";
        Plus3ERom1 => rom_plus3e_1, "+3e ROM 1";
        Plus3ERom2 => rom_plus3e_2, "+3e ROM 2";
        Plus3ERom3 => rom_plus3e_3, "+3e ROM 3";
        Tc2048 => rom_2048_0, "TC2048 ROM";
        Tc2068Rom0 => rom_2068_0, "TC2068 ROM 0";
        Tc2068Rom1 => rom_2068_1, "TC2068 ROM 1";
        Ts2068Rom0 => rom_ts2068_0, "TS2068 ROM 0";
        Ts2068Rom1 => rom_ts2068_1, "TS2068 ROM 1";
        PentagonRom0 => rom_pentagon_0, "Pentagon 128K ROM 0";
        PentagonRom1 => rom_pentagon_1, "Pentagon 128K ROM 1";
        PentagonRom2 => rom_pentagon_2, "Pentagon 128K ROM 2";
        Pentagon512Rom0 => rom_pentagon512_0, "Pentagon 512K ROM 0";
        Pentagon512Rom1 => rom_pentagon512_1, "Pentagon 512K ROM 1";
        Pentagon512Rom2 => rom_pentagon512_2, "Pentagon 512K ROM 2";
        Pentagon512Rom3 => rom_pentagon512_3, "Pentagon 512K ROM 3";
        Pentagon1024Rom0 => rom_pentagon1024_0, "Pentagon 1024K ROM 0";
        Pentagon1024Rom1 => rom_pentagon1024_1, "Pentagon 1024K ROM 1";
        Pentagon1024Rom2 => rom_pentagon1024_2, "Pentagon 1024K ROM 2";
        Pentagon1024Rom3 => rom_pentagon1024_3, "Pentagon 1024K ROM 3";
        ScorpionRom0 => rom_scorpion_0, "Scorpion ROM 0";
        ScorpionRom1 => rom_scorpion_1, "Scorpion ROM 1";
        ScorpionRom2 => rom_scorpion_2, "Scorpion ROM 2";
        ScorpionRom3 => rom_scorpion_3, "Scorpion ROM 3";
        SeRom0 => rom_se_0, "Spectrum SE ROM 0";
        SeRom1 => rom_se_1, "Spectrum SE ROM 1";
    }
}

rom_table! {
    /// A ROM used by an optional peripheral.
    PeripheralRom {
        Interface1 => rom_interface1, "Interface 1 ROM";
        Beta128 => rom_beta128, "Beta 128 ROM";
        PlusD => rom_plusd, "+D ROM";
        Didaktik80 => rom_didaktik80, "Didaktik 80 ROM";
        Disciple => rom_disciple, "DISCiPLE ROM";
        Opus => rom_opus, "Opus Discovery ROM";
        SpeccyBoot => rom_speccyboot, "SpeccyBoot ROM";
        USource => rom_usource, "uSource ROM";
    }
}

/// Number of slots in the machine ROM table.
pub const MACHINE_ROM_COUNT: usize = MachineRom::ALL.len();
/// Number of slots in the peripheral ROM table.
pub const PERIPHERAL_ROM_COUNT: usize = PeripheralRom::ALL.len();

/// Which of the two ROM tables an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomSpace {
    Machine,
    Peripheral,
}

impl RomSpace {
    pub fn slot_count(self) -> usize {
        match self {
            RomSpace::Machine => MACHINE_ROM_COUNT,
            RomSpace::Peripheral => PERIPHERAL_ROM_COUNT,
        }
    }
}

impl Display for RomSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RomSpace::Machine => "machine",
            RomSpace::Peripheral => "peripheral",
        })
    }
}

/// A slot in either ROM table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomSlot {
    Machine(MachineRom),
    Peripheral(PeripheralRom),
}

impl RomSlot {
    /// Look a slot up by its position in one of the tables.
    pub fn from_index(index: usize, space: RomSpace) -> Result<RomSlot, SettingsError> {
        let slot = match space {
            RomSpace::Machine => MachineRom::from_index(index).map(RomSlot::Machine),
            RomSpace::Peripheral => PeripheralRom::from_index(index).map(RomSlot::Peripheral),
        };
        slot.ok_or(SettingsError::OutOfRange { space, index })
    }
    pub fn space(self) -> RomSpace {
        match self {
            RomSlot::Machine(_) => RomSpace::Machine,
            RomSlot::Peripheral(_) => RomSpace::Peripheral,
        }
    }
    pub fn index(self) -> usize {
        match self {
            RomSlot::Machine(r) => r.index(),
            RomSlot::Peripheral(r) => r.index(),
        }
    }
    pub fn setting_name(self) -> &'static str {
        match self {
            RomSlot::Machine(r) => r.setting_name(),
            RomSlot::Peripheral(r) => r.setting_name(),
        }
    }
    pub fn description(self) -> &'static str {
        match self {
            RomSlot::Machine(r) => r.description(),
            RomSlot::Peripheral(r) => r.description(),
        }
    }
    pub fn path(self, settings: &Settings) -> &Option<String> {
        match self {
            RomSlot::Machine(r) => r.path(settings),
            RomSlot::Peripheral(r) => r.path(settings),
        }
    }
    pub fn path_mut(self, settings: &mut Settings) -> &mut Option<String> {
        match self {
            RomSlot::Machine(r) => r.path_mut(settings),
            RomSlot::Peripheral(r) => r.path_mut(settings),
        }
    }
}

impl From<MachineRom> for RomSlot {
    fn from(rom: MachineRom) -> Self {
        RomSlot::Machine(rom)
    }
}
impl From<PeripheralRom> for RomSlot {
    fn from(rom: PeripheralRom) -> Self {
        RomSlot::Peripheral(rom)
    }
}

/// Get the setting holding the ROM path of a slot, addressed by index.
///
/// The returned field still belongs to `settings`; replace it with
/// [set_string][crate::core::set_string] rather than taking it.
pub fn get_rom_setting(
    settings: &mut Settings,
    index: usize,
    is_peripheral: bool,
) -> Result<&mut Option<String>, SettingsError> {
    let space = if is_peripheral {
        RomSpace::Peripheral
    } else {
        RomSpace::Machine
    };
    Ok(RomSlot::from_index(index, space)?.path_mut(settings))
}

/// The emulated machine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Machine {
    Spectrum16,
    Spectrum48,
    Spectrum128,
    Plus2,
    Plus2A,
    Plus3,
    Plus3E,
    Tc2048,
    Tc2068,
    Ts2068,
    Pentagon,
    Pentagon512,
    Pentagon1024,
    Scorpion,
    Se,
}

impl Machine {
    pub const ALL: &'static [Machine] = &[
        Machine::Spectrum16,
        Machine::Spectrum48,
        Machine::Spectrum128,
        Machine::Plus2,
        Machine::Plus2A,
        Machine::Plus3,
        Machine::Plus3E,
        Machine::Tc2048,
        Machine::Tc2068,
        Machine::Ts2068,
        Machine::Pentagon,
        Machine::Pentagon512,
        Machine::Pentagon1024,
        Machine::Scorpion,
        Machine::Se,
    ];

    /// The id used by the `start_machine` setting.
    pub fn id(self) -> &'static str {
        match self {
            Machine::Spectrum16 => "16",
            Machine::Spectrum48 => "48",
            Machine::Spectrum128 => "128",
            Machine::Plus2 => "plus2",
            Machine::Plus2A => "plus2a",
            Machine::Plus3 => "plus3",
            Machine::Plus3E => "plus3e",
            Machine::Tc2048 => "2048",
            Machine::Tc2068 => "2068",
            Machine::Ts2068 => "ts2068",
            Machine::Pentagon => "pentagon",
            Machine::Pentagon512 => "pentagon512",
            Machine::Pentagon1024 => "pentagon1024",
            Machine::Scorpion => "scorpion",
            Machine::Se => "se",
        }
    }

    pub fn from_id(id: &str) -> Option<Machine> {
        let id = id.trim();
        Machine::ALL
            .iter()
            .copied()
            .find(|m| m.id().eq_ignore_ascii_case(id))
    }

    pub fn name(self) -> &'static str {
        match self {
            Machine::Spectrum16 => "Spectrum 16K",
            Machine::Spectrum48 => "Spectrum 48K",
            Machine::Spectrum128 => "Spectrum 128K",
            Machine::Plus2 => "Spectrum +2",
            Machine::Plus2A => "Spectrum +2A",
            Machine::Plus3 => "Spectrum +3",
            Machine::Plus3E => "Spectrum +3e",
            Machine::Tc2048 => "Timex TC2048",
            Machine::Tc2068 => "Timex TC2068",
            Machine::Ts2068 => "Timex TS2068",
            Machine::Pentagon => "Pentagon 128K",
            Machine::Pentagon512 => "Pentagon 512K",
            Machine::Pentagon1024 => "Pentagon 1024K",
            Machine::Scorpion => "Scorpion ZS 256",
            Machine::Se => "Spectrum SE",
        }
    }

    /// The contiguous run of machine ROM slots this model loads, in paging order.
    pub fn roms(self) -> &'static [MachineRom] {
        let (start, count) = match self {
            Machine::Spectrum16 => (0, 1),
            Machine::Spectrum48 => (1, 1),
            Machine::Spectrum128 => (2, 2),
            Machine::Plus2 => (4, 2),
            Machine::Plus2A => (6, 4),
            Machine::Plus3 => (10, 4),
            Machine::Plus3E => (14, 4),
            Machine::Tc2048 => (18, 1),
            Machine::Tc2068 => (19, 2),
            Machine::Ts2068 => (21, 2),
            Machine::Pentagon => (23, 3),
            Machine::Pentagon512 => (26, 4),
            Machine::Pentagon1024 => (30, 4),
            Machine::Scorpion => (34, 4),
            Machine::Se => (38, 2),
        };
        &MachineRom::ALL[start..start + count]
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Settings {
    /// The ROM path held by a slot, if any.
    pub fn rom(&self, slot: RomSlot) -> Option<&str> {
        slot.path(self).as_deref()
    }

    /// The machine named by `start_machine`, `None` if it is unset or not a known id.
    pub fn start_machine(&self) -> Option<Machine> {
        self.start_machine.as_deref().and_then(Machine::from_id)
    }

    /// The ROM paths a machine model loads, in paging order.
    pub fn machine_roms(&self, machine: Machine) -> Vec<(MachineRom, Option<&str>)> {
        machine
            .roms()
            .iter()
            .map(|&rom| (rom, self.rom(rom.into())))
            .collect()
    }
}

/// Directories searched for ROM images given as bare file names, most specific first.
pub fn rom_search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();
    if let Some(data) = dirs::data_dir() {
        search.push(data.join("fuse").join("roms"));
    }
    if let Some(config) = dirs::config_dir() {
        search.push(config.join("fuse").join("roms"));
    }
    #[cfg(unix)]
    {
        search.push(PathBuf::from("/usr/local/share/fuse"));
        search.push(PathBuf::from("/usr/share/fuse"));
    }
    search
}

/// Find the ROM image a slot's setting refers to.
///
/// Absolute paths are used as they are. Relative ones are tried against each of
/// `search_dirs` in turn, then against the working directory.
pub fn locate_rom<P: AsRef<Path>>(file: &str, search_dirs: &[P]) -> Option<PathBuf> {
    let path = Path::new(file);
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    let found = search_dirs
        .iter()
        .map(|dir| dir.as_ref().join(path))
        .chain(std::iter::once(path.to_path_buf()))
        .find(|candidate| candidate.is_file());
    match &found {
        Some(p) => debug!("Found ROM {} at {:?}", file, p),
        None => debug!("ROM {} not found", file),
    }
    found
}
