//! # Header normalization
//!
//! Uploaded KOI tables come from NASA archive exports, spreadsheets and hand-written files,
//! so the same column shows up as `koi_period`, `Period (days)`, `period_days`, `KOI Period`…
//! [`normalize_header`] folds all of them onto one key.
//!
//! ## Algorithm
//! -----------------
//! 1. strip a leading byte-order mark, trim, lowercase;
//! 2. parentheses → spaces, every non-alphanumeric non-space character → space;
//! 3. collapse whitespace runs to one space, trim;
//! 4. look the result up in the alias table, otherwise replace spaces with underscores.
//!
//! Step 4's fallback makes the function total: an unknown header still produces a usable
//! (if non-canonical) key instead of failing the import.
//!
//! Alias keys are passed through steps 1-3 when the table is built, so they can be written
//! the way users type them (`"koi prad (re)"`).
use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("static regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// `(alias as typed, target key)`
const ALIASES: &[(&str, &str)] = &[
    // orbital period
    ("period", "koi_period"),
    ("period_days", "koi_period"),
    ("period (days)", "koi_period"),
    ("orbital period", "koi_period"),
    ("orbital period (days)", "koi_period"),
    ("koi period (days)", "koi_period"),
    ("pl_orbper", "koi_period"),
    // transit duration
    ("duration", "koi_duration"),
    ("duration_hrs", "koi_duration"),
    ("transit duration", "koi_duration"),
    ("transit duration (hrs)", "koi_duration"),
    ("koi duration (hrs)", "koi_duration"),
    // transit depth
    ("depth", "koi_depth"),
    ("depth_ppm", "koi_depth"),
    ("transit depth", "koi_depth"),
    ("transit depth (ppm)", "koi_depth"),
    ("koi depth (ppm)", "koi_depth"),
    // planet radius
    ("prad", "koi_prad"),
    ("planet radius", "koi_prad"),
    ("planet radius (re)", "koi_prad"),
    ("planetary radius", "koi_prad"),
    ("koi prad (re)", "koi_prad"),
    ("pl_rade", "koi_prad"),
    ("radius", "koi_prad"),
    // stellar effective temperature
    ("teff", "koi_steff"),
    ("steff", "koi_steff"),
    ("stellar teff", "koi_steff"),
    ("stellar effective temperature", "koi_steff"),
    ("stellar effective temperature (k)", "koi_steff"),
    ("koi steff (k)", "koi_steff"),
    ("st_teff", "koi_steff"),
    // stellar surface gravity
    ("logg", "koi_slogg"),
    ("slogg", "koi_slogg"),
    ("stellar logg", "koi_slogg"),
    ("stellar surface gravity", "koi_slogg"),
    ("koi slogg (cgs)", "koi_slogg"),
    ("st_logg", "koi_slogg"),
    // stellar radius
    ("srad", "koi_srad"),
    ("stellar radius", "koi_srad"),
    ("stellar radius (rsun)", "koi_srad"),
    ("koi srad (rsun)", "koi_srad"),
    ("st_rad", "koi_srad"),
    // stellar mass
    ("smass", "koi_smass"),
    ("stellar mass", "koi_smass"),
    ("stellar mass (msun)", "koi_smass"),
    ("koi smass (msun)", "koi_smass"),
    ("st_mass", "koi_smass"),
    // impact parameter
    ("impact", "koi_impact"),
    ("impact parameter", "koi_impact"),
    // kepler magnitude
    ("kepmag", "koi_kepmag"),
    ("kepler magnitude", "koi_kepmag"),
    ("kepler mag", "koi_kepmag"),
    ("koi kepmag (mag)", "koi_kepmag"),
    // false positive flags
    ("fpflag_nt", "koi_fpflag_nt"),
    ("not transit-like flag", "koi_fpflag_nt"),
    ("not transit like", "koi_fpflag_nt"),
    ("fpflag_ss", "koi_fpflag_ss"),
    ("stellar eclipse flag", "koi_fpflag_ss"),
    ("stellar eclipse", "koi_fpflag_ss"),
    ("fpflag_co", "koi_fpflag_co"),
    ("centroid offset flag", "koi_fpflag_co"),
    ("centroid offset", "koi_fpflag_co"),
    ("fpflag_ec", "koi_fpflag_ec"),
    ("ephemeris match flag", "koi_fpflag_ec"),
    ("ephemeris match indicates contamination flag", "koi_fpflag_ec"),
    // orbital extras, read only by the orbit mapper
    ("sma", "koi_sma"),
    ("semi major axis", "koi_sma"),
    ("semi-major axis (au)", "koi_sma"),
    ("orbit semi-major axis", "koi_sma"),
    ("pl_orbsmax", "koi_sma"),
    ("eccen", "koi_eccen"),
    ("eccentricity", "koi_eccen"),
    ("pl_orbeccen", "koi_eccen"),
    ("incl", "koi_incl"),
    ("inclination", "koi_incl"),
    ("inclination (deg)", "koi_incl"),
    ("pl_orbincl", "koi_incl"),
    ("longp", "koi_longp"),
    ("argument of periapsis", "koi_longp"),
    ("argument of periastron", "koi_longp"),
    ("longitude of periastron", "koi_longp"),
    ("pl_orblper", "koi_longp"),
];

static ALIAS_TABLE: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    ALIASES
        .iter()
        .map(|(alias, target)| (normalize_text(alias), *target))
        .collect()
});

/// Steps 1-3 of the normalization: text folding without the alias lookup.
fn normalize_text(raw: &str) -> String {
    let lowered = raw
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(['(', ')'], " ");
    let spaced = NON_ALPHANUMERIC.replace_all(&lowered, " ");
    WHITESPACE_RUN.replace_all(&spaced, " ").trim().to_string()
}

/// Map a raw column header onto its normalized key.
///
/// Arguments
/// ---------
/// * `raw`: the header cell as read from the file (BOM, casing and punctuation allowed)
///
/// Return
/// ------
/// * the canonical name when the header is a known alias, otherwise the folded header with
///   spaces replaced by underscores. Never fails.
///
/// Example
/// -------
/// ```
/// use koiviz::catalog::normalize_header;
///
/// assert_eq!(normalize_header("\u{feff}Period (days)"), "koi_period");
/// assert_eq!(normalize_header("koi_prad"), "koi_prad");
/// assert_eq!(normalize_header("Ra [deg]"), "ra_deg");
/// ```
pub fn normalize_header(raw: &str) -> String {
    let folded = normalize_text(raw);
    match ALIAS_TABLE.get(&folded) {
        Some(target) => (*target).to_string(),
        None => folded.replace(' ', "_"),
    }
}

/// Normalize a whole header row, keeping positions.
pub fn normalize_headers<S: AsRef<str>>(raw_headers: &[S]) -> Vec<String> {
    raw_headers
        .iter()
        .map(|h| normalize_header(h.as_ref()))
        .collect()
}

#[cfg(test)]
mod header_test {
    use super::*;
    use crate::catalog::CanonicalField;

    #[test]
    fn test_normalize_text_steps() {
        assert_eq!(normalize_text("  KOI_Prad (Re)  "), "koi prad re");
        assert_eq!(normalize_text("\u{feff}koi_period"), "koi period");
        assert_eq!(normalize_text("a\t\tb -- c"), "a b c");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(normalize_header("period_days"), "koi_period");
        assert_eq!(normalize_header("koi prad (re)"), "koi_prad");
        assert_eq!(normalize_header("Planet Radius (Re)"), "koi_prad");
        assert_eq!(normalize_header("Stellar Mass (Msun)"), "koi_smass");
        assert_eq!(normalize_header("pl_orbsmax"), "koi_sma");
        assert_eq!(normalize_header("Eccentricity"), "koi_eccen");
    }

    #[test]
    fn test_canonical_names_are_fixed_points() {
        for field in CanonicalField::ALL {
            assert_eq!(normalize_header(field.as_str()), field.as_str());
            assert_eq!(
                normalize_header(&field.as_str().to_uppercase()),
                field.as_str()
            );
        }
    }

    #[test]
    fn test_unknown_header_fallback() {
        assert_eq!(normalize_header("KepID"), "kepid");
        assert_eq!(normalize_header("Some weird/column"), "some_weird_column");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_alias_targets_are_stable() {
        for (alias, target) in ALIASES {
            let once = normalize_header(alias);
            assert_eq!(once, *target, "alias {alias}");
            assert_eq!(normalize_header(&once), once, "alias {alias}");
        }
    }
}
