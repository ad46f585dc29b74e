//! Static reference data served by the `/metadata` endpoints.

use serde::Serialize;

use crate::configuration::CATEGORIES;

/// A country with its ISO 3166-1 alpha-2 code and international dialing prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub dial_code: &'static str,
}

/// A configuration category key with its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub key: &'static str,
    pub name: &'static str,
}

const fn country(code: &'static str, name: &'static str, dial_code: &'static str) -> Country {
    Country {
        code,
        name,
        dial_code,
    }
}

/// Countries offered for phone number country codes, sorted by name.
/// Codes are lowercase to match the stored `countryCode` values.
pub const COUNTRIES: &[Country] = &[
    country("ar", "Argentina", "+54"),
    country("au", "Australia", "+61"),
    country("at", "Austria", "+43"),
    country("be", "Belgium", "+32"),
    country("br", "Brazil", "+55"),
    country("ca", "Canada", "+1"),
    country("cl", "Chile", "+56"),
    country("cn", "China", "+86"),
    country("co", "Colombia", "+57"),
    country("cz", "Czechia", "+420"),
    country("dk", "Denmark", "+45"),
    country("eg", "Egypt", "+20"),
    country("fi", "Finland", "+358"),
    country("fr", "France", "+33"),
    country("de", "Germany", "+49"),
    country("gh", "Ghana", "+233"),
    country("gr", "Greece", "+30"),
    country("in", "India", "+91"),
    country("id", "Indonesia", "+62"),
    country("ie", "Ireland", "+353"),
    country("il", "Israel", "+972"),
    country("it", "Italy", "+39"),
    country("jp", "Japan", "+81"),
    country("ke", "Kenya", "+254"),
    country("kr", "Korea, Republic of", "+82"),
    country("mx", "Mexico", "+52"),
    country("nl", "Netherlands", "+31"),
    country("nz", "New Zealand", "+64"),
    country("ng", "Nigeria", "+234"),
    country("no", "Norway", "+47"),
    country("pk", "Pakistan", "+92"),
    country("pe", "Peru", "+51"),
    country("ph", "Philippines", "+63"),
    country("pl", "Poland", "+48"),
    country("pt", "Portugal", "+351"),
    country("ro", "Romania", "+40"),
    country("sa", "Saudi Arabia", "+966"),
    country("sg", "Singapore", "+65"),
    country("za", "South Africa", "+27"),
    country("es", "Spain", "+34"),
    country("se", "Sweden", "+46"),
    country("ch", "Switzerland", "+41"),
    country("tw", "Taiwan", "+886"),
    country("th", "Thailand", "+66"),
    country("tr", "Turkey", "+90"),
    country("ua", "Ukraine", "+380"),
    country("ae", "United Arab Emirates", "+971"),
    country("gb", "United Kingdom", "+44"),
    country("us", "United States", "+1"),
    country("vn", "Vietnam", "+84"),
];

/// Look up a country by its code (case-insensitive).
pub fn find_country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// All configuration categories, in display order.
pub fn categories() -> Vec<CategoryInfo> {
    CATEGORIES
        .iter()
        .map(|&(key, name)| CategoryInfo { key, name })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::DEFAULT_COUNTRY_CODE;

    #[test]
    fn countries_sorted_by_name_with_unique_codes() {
        let names: Vec<_> = COUNTRIES.iter().map(|c| c.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        let mut codes: Vec<_> = COUNTRIES.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), COUNTRIES.len());
    }

    #[test]
    fn default_country_code_is_listed() {
        let us = find_country(DEFAULT_COUNTRY_CODE).unwrap();
        assert_eq!(us.dial_code, "+1");
        assert!(find_country("US").is_some());
        assert!(find_country("zz").is_none());
    }

    #[test]
    fn categories_serialize_with_keys() {
        let json = serde_json::to_value(categories()).unwrap();
        assert_eq!(json[0]["key"], "contact_labels");
        assert_eq!(json.as_array().unwrap().len(), 4);
    }
}
