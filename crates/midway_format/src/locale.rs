//! Locale configuration consulted by the value formatters.
//!
//! A [`LocaleConfig`] is an explicit immutable value: the host loads one per
//! language/profile switch and passes it into every renderer. Nothing in this
//! module mutates shared state, so concurrent renders may share one config
//! freely.

/// Placement of the currency symbol relative to the amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affix {
    Prefix,
    Suffix,
}

/// Descriptor for one display currency.
///
/// `rate` is the fixed-point exchange rate applied to raw game amounts
/// (minor units appear below 100 after multiplication). The ASCII pair is
/// used when the active font cannot draw the Unicode symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrencyDescriptor {
    pub rate: i32,
    pub affix: Affix,
    pub symbol: &'static str,
    pub ascii_affix: Affix,
    pub ascii_symbol: &'static str,
}

impl CurrencyDescriptor {
    pub const POUNDS: Self = Self {
        rate: 10,
        affix: Affix::Prefix,
        symbol: "\u{a3}",
        ascii_affix: Affix::Suffix,
        ascii_symbol: "GBP",
    };
    pub const DOLLARS: Self = Self {
        rate: 10,
        affix: Affix::Prefix,
        symbol: "$",
        ascii_affix: Affix::Prefix,
        ascii_symbol: "$",
    };
    pub const EUROS: Self = Self {
        rate: 10,
        affix: Affix::Suffix,
        symbol: "\u{20ac}",
        ascii_affix: Affix::Suffix,
        ascii_symbol: "EUR",
    };
    pub const YEN: Self = Self {
        rate: 1000,
        affix: Affix::Prefix,
        symbol: "\u{a5}",
        ascii_affix: Affix::Suffix,
        ascii_symbol: "YEN",
    };
    pub const WON: Self = Self {
        rate: 10000,
        affix: Affix::Prefix,
        symbol: "\u{20a9}",
        ascii_affix: Affix::Suffix,
        ascii_symbol: "W",
    };
}

/// Display system for speeds and lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasurementSystem {
    #[default]
    Imperial,
    Metric,
    Si,
}

/// Months in the park calendar (March through October).
pub const MONTH_COUNT: u16 = 8;

pub fn date_month(date: u16) -> u16 {
    date % MONTH_COUNT
}

/// 1-based display year for a stored date.
pub fn date_year(date: u16) -> u16 {
    date / MONTH_COUNT + 1
}

pub fn mph_to_kmph(mph: u16) -> u16 {
    ((mph as u32 * 1648) >> 10) as u16
}

/// Miles per hour to decimetres per second; rendered with one decimal place
/// this reads as metres per second.
pub fn mph_to_dmps(mph: u16) -> u16 {
    ((mph as u32 * 73418) >> 14) as u16
}

pub fn metres_to_feet(metres: i16) -> i16 {
    (metres as i32 * 840 / 256) as i16
}

/// Read-only locale settings for one active language/profile.
///
/// The unit and duration fields are sub-templates in the token mini-language,
/// rendered recursively with a synthesized argument list. Language packs
/// localize them by replacing the values on profile switch.
#[derive(Clone, Debug)]
pub struct LocaleConfig {
    pub currency: CurrencyDescriptor,
    pub measurement: MeasurementSystem,
    pub decimal_separator: String,
    pub group_separator: String,
    /// Whether the active font can draw the Unicode currency symbol.
    pub unicode_capable: bool,
    pub month_names: [String; MONTH_COUNT as usize],
    /// `{MONTH}, Year {COMMA16}` - args are month index and 1-based year.
    pub month_year: String,
    pub velocity_mph: String,
    pub velocity_kmph: String,
    pub velocity_mps: String,
    pub length_metres: String,
    pub length_feet: String,
    /// Minutes/seconds templates indexed by [minutes: zero/one/many][seconds plural].
    pub duration: [[String; 2]; 3],
    /// Hours/minutes templates indexed by [hours: zero/one/many][minutes plural].
    pub realtime: [[String; 2]; 3],
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyDescriptor::POUNDS,
            measurement: MeasurementSystem::Imperial,
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            unicode_capable: true,
            month_names: [
                "March", "April", "May", "June", "July", "August", "September", "October",
            ]
            .map(str::to_string),
            month_year: "{MONTH}, Year {COMMA16}".to_string(),
            velocity_mph: "{COMMA16} mph".to_string(),
            velocity_kmph: "{COMMA16} km/h".to_string(),
            velocity_mps: "{COMMA1DP16} m/s".to_string(),
            length_metres: "{COMMA16} m".to_string(),
            length_feet: "{COMMA16} ft".to_string(),
            duration: [
                ["{COMMA16} sec", "{COMMA16} secs"],
                ["{COMMA16} min {COMMA16} sec", "{COMMA16} min {COMMA16} secs"],
                ["{COMMA16} mins {COMMA16} sec", "{COMMA16} mins {COMMA16} secs"],
            ]
            .map(|pair| pair.map(str::to_string)),
            realtime: [
                ["{COMMA16} min", "{COMMA16} mins"],
                ["{COMMA16} hour {COMMA16} min", "{COMMA16} hour {COMMA16} mins"],
                ["{COMMA16} hours {COMMA16} min", "{COMMA16} hours {COMMA16} mins"],
            ]
            .map(|pair| pair.map(str::to_string)),
        }
    }
}
