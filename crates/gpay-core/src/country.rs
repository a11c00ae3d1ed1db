//! # Country Code Mapper
//!
//! Static ISO 3166-1 alpha-3 → nationality adjective table, plus the ICAO
//! travel-document codes that have no ISO counterpart (British Overseas
//! Territories variants, UN and Interpol documents, stateless persons and
//! refugees, Germany's one-letter `D<<`).
//!
//! The table is process-wide constant data. Lookup maps are built once on
//! first use and are read-only afterwards, so any number of threads may
//! query them concurrently.
//!
//! Values are the strings the portal's registration forms and stored
//! passport records already use, including a few country names that are not
//! strictly adjectives (`DNK` → `Denmark`). Changing one changes what
//! downstream nationality matching sees.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Every mapped code with its nationality string, in table order.
///
/// Several codes share a nationality (`GBR` and the `GB?` territory codes
/// all map to `British`); reverse lookups resolve to the first entry.
pub const COUNTRY_CODE_TO_NATIONALITY: &[(&str, &str)] = &[
    ("AFG", "Afghan"),
    ("ALB", "Albanian"),
    ("DZA", "Algerian"),
    ("ASM", "American Samoan"),
    ("AND", "Andorran"),
    ("AGO", "Angolan"),
    ("AIA", "Anguillan"),
    ("ATG", "Antiguan"),
    ("ARG", "Argentinian"),
    ("ARM", "Armenian"),
    ("ABW", "Aruban"),
    ("AUS", "Australian"),
    ("AUT", "Austrian"),
    ("AZE", "Azerbaijani"),
    ("BHS", "Bahamian"),
    ("BHR", "Bahraini"),
    ("BGD", "Bangladeshi"),
    ("BRB", "Barbadian"),
    ("BLR", "Belarusian"),
    ("BEL", "Belgian"),
    ("BLZ", "Belizean"),
    ("BEN", "Beninese"),
    ("BMU", "Bermudian"),
    ("BTN", "Bhutanese"),
    ("BOL", "Bolivian"),
    ("BIH", "Bosnian"),
    ("BWA", "Botswanan"),
    ("BRA", "Brazilian"),
    ("BRN", "Bruneian"),
    ("BGR", "Bulgarian"),
    ("BFA", "Burkinabe"),
    ("BDI", "Burundian"),
    ("MMR", "Burmese"),
    ("KHM", "Cambodian"),
    ("CMR", "Cameroonian"),
    ("CAN", "Canadian"),
    ("CPV", "Cape Verdean"),
    ("CYM", "Caymanian"),
    ("CAF", "Central African"),
    ("TCD", "Chadian"),
    ("CHL", "Chilean"),
    ("CHN", "Chinese"),
    ("COL", "Colombian"),
    ("COM", "Comorian"),
    ("COG", "Congolese"),
    ("COD", "Congolese"),
    ("COK", "Cook Islander"),
    ("CRI", "Costa Rican"),
    ("CIV", "Ivorian"),
    ("HRV", "Croatian"),
    ("CUB", "Cuban"),
    ("CYP", "Cypriot"),
    ("CZE", "Czech"),
    ("DNK", "Denmark"),
    ("DJI", "Djibouti"),
    ("DMA", "Dominica"),
    ("DOM", "Dominican Republic"),
    ("ECU", "Ecuadorean"),
    ("EGY", "Egyptian"),
    ("SLV", "Salvadoran"),
    ("GNQ", "Equatorial Guinean"),
    ("ERI", "Eritrean"),
    ("EST", "Estonian"),
    ("ETH", "Ethiopian"),
    ("FLK", "Falkland Islander"),
    ("FRO", "Faroese"),
    ("FJI", "Fijian"),
    ("FIN", "Finnish"),
    ("FRA", "French"),
    ("GAB", "Gabonese"),
    ("GMB", "Gambian"),
    ("GEO", "Georgian"),
    ("DEU", "German"),
    ("GHA", "Ghanaian"),
    ("GIB", "Gibraltar"),
    ("GRC", "Greek"),
    ("GRL", "Greenlandic"),
    ("GRD", "Grenadian"),
    ("GUM", "Guamanian"),
    ("GTM", "Guatemalan"),
    ("GGY", "Guernsey"),
    ("GIN", "Guinean"),
    ("GNB", "Guinea-Bissauan"),
    ("GUY", "Guyanese"),
    ("HTI", "Haitian"),
    ("HND", "Honduran"),
    ("HKG", "Hong Kong"),
    ("HUN", "Hungarian"),
    ("ISL", "Icelandic"),
    ("IND", "Indian"),
    ("IDN", "Indonesian"),
    ("IRN", "Iranian"),
    ("IRQ", "Iraqi"),
    ("IRL", "Irish"),
    ("IMN", "Manx"),
    ("ISR", "Israeli"),
    ("ITA", "Italian"),
    ("JAM", "Jamaican"),
    ("JPN", "Japanese"),
    ("JEY", "Jersey"),
    ("JOR", "Jordanian"),
    ("KAZ", "Kazakhstani"),
    ("KEN", "Kenyan"),
    ("KIR", "I-Kiribati"),
    ("PRK", "North Korean"),
    ("KOR", "South Korean"),
    ("KWT", "Kuwaiti"),
    ("KGZ", "Kyrgyz"),
    ("LAO", "Laotian"),
    ("LVA", "Latvian"),
    ("LBN", "Lebanese"),
    ("LSO", "Basotho"),
    ("LBR", "Liberian"),
    ("LBY", "Libyan"),
    ("LIE", "Liechtensteiner"),
    ("LTU", "Lithuanian"),
    ("LUX", "Luxembourger"),
    ("MAC", "Macanese"),
    ("MKD", "Macedonian"),
    ("MDG", "Malagasy"),
    ("MWI", "Malawian"),
    ("MYS", "Malaysian"),
    ("MDV", "Maldivian"),
    ("MLI", "Malian"),
    ("MLT", "Maltese"),
    ("MHL", "Marshallese"),
    ("MRT", "Mauritanian"),
    ("MUS", "Mauritian"),
    ("MEX", "Mexican"),
    ("FSM", "Micronesian"),
    ("MDA", "Moldovan"),
    ("MCO", "Monacan"),
    ("MNG", "Mongolian"),
    ("MNE", "Montenegrin"),
    ("MSR", "Montserratian"),
    ("MAR", "Moroccan"),
    ("MOZ", "Mozambican"),
    ("NAM", "Namibian"),
    ("NRU", "Nauruan"),
    ("NPL", "Nepalese"),
    ("NLD", "Dutch"),
    ("NCL", "New Caledonian"),
    ("NZL", "New Zealander"),
    ("NIC", "Nicaraguan"),
    ("NER", "Nigerien"),
    ("NGA", "Nigerian"),
    ("NIU", "Niuean"),
    ("NOR", "Norwegian"),
    ("OMN", "Omani"),
    ("PAK", "Pakistani"),
    ("PLW", "Palauan"),
    ("PSE", "Palestinian"),
    ("PAN", "Panamanian"),
    ("PNG", "Papua New Guinean"),
    ("PRY", "Paraguayan"),
    ("PER", "Peruvian"),
    ("PHL", "Filipino"),
    ("PCN", "Pitcairn Islander"),
    ("POL", "Polish"),
    ("PRT", "Portuguese"),
    ("PRI", "Puerto Rican"),
    ("QAT", "Qatari"),
    ("REU", "Réunionese"),
    ("ROU", "Romanian"),
    ("RUS", "Russian"),
    ("RWA", "Rwandan"),
    ("SHN", "Saint Helenian"),
    ("KNA", "Kittitian or Nevisian"),
    ("LCA", "Saint Lucian"),
    ("SPM", "Saint-Pierrais"),
    ("VCT", "Vincentian"),
    ("WSM", "Samoan"),
    ("SMR", "San Marinese"),
    ("STP", "São Toméan"),
    ("SAU", "Saudi"),
    ("SEN", "Senegalese"),
    ("SRB", "Serbian"),
    ("SYC", "Seychellois"),
    ("SLE", "Sierra Leonean"),
    ("SGP", "Singaporean"),
    ("SVK", "Slovak"),
    ("SVN", "Slovenian"),
    ("SLB", "Solomon Islander"),
    ("SOM", "Somali"),
    ("ZAF", "South African"),
    ("SSD", "South Sudanese"),
    ("ESP", "Spanish"),
    ("LKA", "Sri Lankan"),
    ("SDN", "Sudanese"),
    ("SUR", "Surinamese"),
    ("SWZ", "Swazi"),
    ("SWE", "Swedish"),
    ("CHE", "Swiss"),
    ("SYR", "Syrian"),
    ("TWN", "Taiwanese"),
    ("TJK", "Tajik"),
    ("TZA", "Tanzanian"),
    ("THA", "Thai"),
    ("TLS", "East Timorese"),
    ("TGO", "Togolese"),
    ("TKL", "Tokelauan"),
    ("TON", "Tongan"),
    ("TTO", "Trinidadian"),
    ("TUN", "Tunisian"),
    ("TUR", "Turkish"),
    ("TKM", "Turkmen"),
    ("TCA", "Turks and Caicos Islander"),
    ("TUV", "Tuvaluan"),
    ("UGA", "Ugandan"),
    ("UKR", "Ukrainian"),
    ("ARE", "Emirati"),
    ("GBR", "British"),
    ("USA", "American"),
    ("URY", "Uruguayan"),
    ("UZB", "Uzbekistani"),
    ("VUT", "Vanuatuan"),
    ("VAT", "Vatican"),
    ("VEN", "Venezuelan"),
    ("VNM", "Vietnamese"),
    ("VGB", "British Virgin Islander"),
    ("VIR", "U.S. Virgin Islander"),
    ("WLF", "Wallisian"),
    ("YEM", "Yemeni"),
    ("ZMB", "Zambian"),
    ("ZWE", "Zimbabwean"),
    ("ALA", "Ålander"),
    ("BES", "Caribbean Dutch"),
    ("CUW", "Curaçaoan"),
    ("ESH", "Sahrawi"),
    ("GLP", "Guadeloupean"),
    ("GUF", "French Guianese"),
    ("MNP", "Northern Marianan"),
    ("MTQ", "Martinican"),
    ("MYT", "Mahoran"),
    ("NFK", "Norfolk Islander"),
    ("PYF", "French Polynesian"),
    ("SXM", "Sint Maartener"),
    ("BLM", "Saint Barthélemy Islander"),
    ("MAF", "Saint-Martinoise"),
    ("CXR", "Christmas Islander"),
    ("CCK", "Cocos Islander"),
    // ICAO travel-document codes outside ISO 3166-1.
    ("GBD", "British"),
    ("GBN", "British"),
    ("GBO", "British"),
    ("GBP", "British"),
    ("GBS", "British"),
    ("UNO", "UN Official"),
    ("XXA", "Stateless"),
    ("XXB", "Refugee"),
    ("XXC", "Refugee"),
    ("XXX", "Unspecified"),
    ("D<<", "German"),
    ("EUE", "European Union"),
    ("RKS", "Kosovar"),
    ("XOM", "Sovereign Military Order of Malta"),
    ("XPO", "Interpol"),
    ("UNA", "UN Specialized Agency"),
    ("UNK", "Kosovar"),
];

static BY_CODE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    COUNTRY_CODE_TO_NATIONALITY.iter().copied().collect()
});

static BY_NATIONALITY: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for (code, nationality) in COUNTRY_CODE_TO_NATIONALITY {
        m.entry(nationality.to_lowercase()).or_insert(*code);
    }
    m
});

/// Resolve a nationality code to its display string.
///
/// The code is trimmed and uppercased before lookup. Unknown codes come back
/// normalized rather than dropped, so callers always have something to show.
/// Absent input yields an empty string.
///
/// ```
/// use gpay_core::nationality_for_code;
///
/// assert_eq!(nationality_for_code("PNG"), "Papua New Guinean");
/// assert_eq!(nationality_for_code(" usa "), "American");
/// assert_eq!(nationality_for_code("ZZZ"), "ZZZ");
/// assert_eq!(nationality_for_code(None), "");
/// ```
pub fn nationality_for_code<'a>(code: impl Into<Option<&'a str>>) -> String {
    let Some(code) = code.into() else {
        return String::new();
    };
    let normalized = code.trim().to_uppercase();
    match BY_CODE.get(normalized.as_str()) {
        Some(nationality) => (*nationality).to_string(),
        None => normalized,
    }
}

/// Look up a code without the pass-through fallback.
pub fn lookup_nationality(code: &str) -> Option<&'static str> {
    BY_CODE.get(code.trim().to_uppercase().as_str()).copied()
}

/// Reverse lookup: nationality string → code, case-insensitive.
pub fn code_for_nationality(nationality: &str) -> Option<&'static str> {
    BY_NATIONALITY
        .get(nationality.trim().to_lowercase().as_str())
        .copied()
}

/// Resolve either a code or a nationality string to its table code.
pub fn normalize_to_code(input: &str) -> Option<&'static str> {
    let trimmed = input.trim();
    let upper = trimmed.to_uppercase();
    if let Some((code, _)) = BY_CODE.get_key_value(upper.as_str()) {
        return Some(*code);
    }
    code_for_nationality(trimmed)
}

/// Resolve either a code or a nationality string to the canonical
/// nationality string. Unrecognized input is returned trimmed.
pub fn normalize_nationality(input: &str) -> String {
    let trimmed = input.trim();
    if let Some(nationality) = lookup_nationality(trimmed) {
        return nationality.to_string();
    }
    match code_for_nationality(trimmed).and_then(|code| BY_CODE.get(code)) {
        Some(nationality) => (*nationality).to_string(),
        None => trimmed.to_string(),
    }
}

/// Whether two nationality values denote the same nationality, whichever
/// form (code or name) each is stored in.
///
/// Both sides are normalized to nationality strings, so `GBD` and `British`
/// match. Blank values never match anything.
pub fn nationalities_match(a: &str, b: &str) -> bool {
    if a.trim().is_empty() || b.trim().is_empty() {
        return false;
    }
    normalize_nationality(a).eq_ignore_ascii_case(&normalize_nationality(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_codes_are_unique() {
        let mut codes: Vec<&str> = COUNTRY_CODE_TO_NATIONALITY.iter().map(|(c, _)| *c).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert!(total >= 250);
    }

    #[test]
    fn table_codes_are_three_mrz_characters() {
        for (code, nationality) in COUNTRY_CODE_TO_NATIONALITY {
            assert_eq!(code.len(), 3, "{code}");
            assert!(
                code.chars().all(|c| c.is_ascii_uppercase() || c == '<'),
                "{code}"
            );
            assert!(!nationality.is_empty(), "{code}");
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(nationality_for_code("PNG"), "Papua New Guinean");
        assert_eq!(nationality_for_code("USA"), "American");
        assert_eq!(nationality_for_code("AUS"), "Australian");
        assert_eq!(nationality_for_code("UNO"), "UN Official");
        assert_eq!(nationality_for_code("XXA"), "Stateless");
        assert_eq!(nationality_for_code("XXX"), "Unspecified");
        assert_eq!(nationality_for_code("D<<"), "German");
    }

    #[test]
    fn british_territory_variants() {
        for code in ["GBR", "GBD", "GBN", "GBO", "GBP", "GBS"] {
            assert_eq!(nationality_for_code(code), "British", "{code}");
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(nationality_for_code("png"), "Papua New Guinean");
        assert_eq!(nationality_for_code("  Aus\t"), "Australian");
    }

    #[test]
    fn unknown_code_passes_through_uppercased() {
        assert_eq!(nationality_for_code("ZZZ"), "ZZZ");
        assert_eq!(nationality_for_code(" zzz "), "ZZZ");
    }

    #[test]
    fn absent_or_blank_input_is_empty() {
        assert_eq!(nationality_for_code(None), "");
        assert_eq!(nationality_for_code(""), "");
        assert_eq!(nationality_for_code("   "), "");
    }

    #[test]
    fn strict_lookup_has_no_fallback() {
        assert_eq!(lookup_nationality("nzl"), Some("New Zealander"));
        assert_eq!(lookup_nationality("ZZZ"), None);
    }

    #[test]
    fn reverse_lookup_prefers_first_entry() {
        assert_eq!(code_for_nationality("british"), Some("GBR"));
        assert_eq!(code_for_nationality("Congolese"), Some("COG"));
        assert_eq!(code_for_nationality("Papua New Guinean"), Some("PNG"));
        assert_eq!(code_for_nationality("Martian"), None);
    }

    #[test]
    fn normalize_to_code_accepts_both_forms() {
        assert_eq!(normalize_to_code("dnk"), Some("DNK"));
        assert_eq!(normalize_to_code("Denmark"), Some("DNK"));
        assert_eq!(normalize_to_code("nowhere"), None);
    }

    #[test]
    fn normalize_nationality_accepts_both_forms() {
        assert_eq!(normalize_nationality("PHL"), "Filipino");
        assert_eq!(normalize_nationality("filipino"), "Filipino");
        assert_eq!(normalize_nationality("  Atlantean "), "Atlantean");
    }

    #[test]
    fn nationalities_match_across_forms() {
        assert!(nationalities_match("DNK", "Denmark"));
        assert!(nationalities_match("GBD", "british"));
        assert!(nationalities_match("Atlantean", "ATLANTEAN"));
        assert!(!nationalities_match("AUS", "NZL"));
        assert!(!nationalities_match("", ""));
        assert!(!nationalities_match("AUS", " "));
    }
}
