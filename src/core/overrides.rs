use log::*;

use crate::core::{option, Kind, OptionInfo, Settings, Value, Warning};

/// Command line names that don't follow from the setting's own name.
const ALIASES: &[(&str, &str)] = &[
    ("machine", "start_machine"),
    ("graphics_filter", "start_scaler_mode"),
    ("tape", "tape_file"),
    ("playback", "playback_file"),
    ("record", "record_file"),
    ("separation", "stereo_ay"),
    ("kempston", "joy_kempston"),
    ("dock", "dck_file"),
    ("if2cart", "if2_file"),
    ("plus3disk", "plus3disk_file"),
    ("betadisk", "betadisk_file"),
    ("plusddisk", "plusddisk_file"),
    ("discipledisk", "discipledisk_file"),
    ("opusdisk", "opusdisk_file"),
    ("rom_16", "rom_16_0"),
    ("rom_48", "rom_48_0"),
    ("rom_interface_1", "rom_interface1"),
    ("help", "show_help"),
    ("version", "show_version"),
];

/// Find the setting an override name refers to.
///
/// Names are matched with `-` and `_` treated alike and leading dashes ignored, so both
/// `--sound-freq` and `sound_freq` work. `no-<flag>` refers to `<flag>` with the value
/// forced off, which is returned as `true` in the second field.
pub fn resolve_name(name: &str) -> Option<(&'static OptionInfo, bool)> {
    let normalized = name.trim().trim_start_matches('-').replace('-', "_");
    let lookup = |n: &str| {
        option(n).or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| *alias == n)
                .and_then(|(_, target)| option(target))
        })
    };
    if let Some(info) = lookup(&normalized) {
        return Some((info, false));
    }
    normalized
        .strip_prefix("no_")
        .and_then(lookup)
        .filter(|info| info.kind() == Kind::Flag)
        .map(|info| (info, true))
}

/// Apply command line overrides to `settings`, in order.
///
/// Later overrides of the same setting win. Unknown names and values that don't parse are
/// skipped and reported, the rest still apply. An empty value switches a flag on,
/// so `("fastload", "")` reads like a bare `--fastload`.
pub fn apply_overrides<I, N, V>(settings: &mut Settings, overrides: I) -> Vec<Warning>
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    let mut warnings = Vec::new();
    for (name, value) in overrides {
        let (name, text) = (name.as_ref(), value.as_ref());
        let warning = match resolve_name(name) {
            None => Some(Warning::UnknownKey {
                name: name.to_string(),
            }),
            Some((info, negated)) => {
                let parsed = if negated {
                    Some(Value::Flag(false))
                } else if info.kind() == Kind::Flag && text.trim().is_empty() {
                    Some(Value::Flag(true))
                } else {
                    info.kind().parse(text)
                };
                match parsed.map(|value| settings.set(info.name, value)) {
                    Some(Ok(())) => {
                        debug!("Override {} = {:?}", info.name, text);
                        None
                    }
                    _ => Some(Warning::Parse {
                        name: info.name.to_string(),
                        value: format!("{:?}", text),
                    }),
                }
            }
        };
        if let Some(warning) = warning {
            warn!("{}", warning);
            warnings.push(warning);
        }
    }
    warnings
}
