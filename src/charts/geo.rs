//! Country name to map location resolution.
//!
//! A built-in gazetteer of approximate country centroids. Names are matched
//! case-insensitively with punctuation and common diacritics ignored, and the
//! usual alternative spellings are accepted.

use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// (name, latitude, longitude)
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("Afghanistan", 33.9, 67.7),
    ("Albania", 41.2, 20.2),
    ("Algeria", 28.0, 1.7),
    ("Andorra", 42.5, 1.6),
    ("Angola", -11.2, 17.9),
    ("Antigua and Barbuda", 17.1, -61.8),
    ("Argentina", -38.4, -63.6),
    ("Armenia", 40.1, 45.0),
    ("Australia", -25.3, 133.8),
    ("Austria", 47.5, 14.6),
    ("Azerbaijan", 40.1, 47.6),
    ("Bahamas", 25.0, -77.4),
    ("Bahrain", 26.0, 50.6),
    ("Bangladesh", 23.7, 90.4),
    ("Barbados", 13.2, -59.5),
    ("Belarus", 53.7, 28.0),
    ("Belgium", 50.5, 4.5),
    ("Belize", 17.2, -88.5),
    ("Benin", 9.3, 2.3),
    ("Bhutan", 27.5, 90.4),
    ("Bolivia", -16.3, -63.6),
    ("Bosnia and Herzegovina", 43.9, 17.7),
    ("Botswana", -22.3, 24.7),
    ("Brazil", -14.2, -51.9),
    ("Brunei", 4.5, 114.7),
    ("Bulgaria", 42.7, 25.5),
    ("Burkina Faso", 12.2, -1.6),
    ("Burundi", -3.4, 29.9),
    ("Cabo Verde", 16.0, -24.0),
    ("Cambodia", 12.6, 104.9),
    ("Cameroon", 7.4, 12.4),
    ("Canada", 56.1, -106.3),
    ("Central African Republic", 6.6, 20.9),
    ("Chad", 15.5, 18.7),
    ("Chile", -35.7, -71.5),
    ("China", 35.9, 104.2),
    ("Colombia", 4.6, -74.3),
    ("Comoros", -11.9, 43.9),
    ("Congo", -0.2, 15.8),
    ("Costa Rica", 9.7, -83.8),
    ("Cote d'Ivoire", 7.5, -5.5),
    ("Croatia", 45.1, 15.2),
    ("Cuba", 21.5, -77.8),
    ("Cyprus", 35.1, 33.4),
    ("Czechia", 49.8, 15.5),
    ("Democratic Republic of the Congo", -4.0, 21.8),
    ("Denmark", 56.3, 9.5),
    ("Djibouti", 11.8, 42.6),
    ("Dominica", 15.4, -61.4),
    ("Dominican Republic", 18.7, -70.2),
    ("Ecuador", -1.8, -78.2),
    ("Egypt", 26.8, 30.8),
    ("El Salvador", 13.8, -88.9),
    ("Equatorial Guinea", 1.7, 10.3),
    ("Eritrea", 15.2, 39.8),
    ("Estonia", 58.6, 25.0),
    ("Eswatini", -26.5, 31.5),
    ("Ethiopia", 9.1, 40.5),
    ("Fiji", -17.7, 178.1),
    ("Finland", 61.9, 25.7),
    ("France", 46.2, 2.2),
    ("Gabon", -0.8, 11.6),
    ("Gambia", 13.4, -15.3),
    ("Georgia", 42.3, 43.4),
    ("Germany", 51.2, 10.5),
    ("Ghana", 7.9, -1.0),
    ("Greece", 39.1, 21.8),
    ("Greenland", 71.7, -42.6),
    ("Grenada", 12.1, -61.7),
    ("Guatemala", 15.8, -90.2),
    ("Guinea", 9.9, -9.7),
    ("Guinea-Bissau", 11.8, -15.2),
    ("Guyana", 4.9, -58.9),
    ("Haiti", 19.0, -72.3),
    ("Honduras", 15.2, -86.2),
    ("Hong Kong", 22.3, 114.2),
    ("Hungary", 47.2, 19.5),
    ("Iceland", 64.9, -19.0),
    ("India", 20.6, 79.0),
    ("Indonesia", -0.8, 113.9),
    ("Iran", 32.4, 53.7),
    ("Iraq", 33.2, 43.7),
    ("Ireland", 53.4, -8.2),
    ("Israel", 31.0, 34.9),
    ("Italy", 41.9, 12.6),
    ("Jamaica", 18.1, -77.3),
    ("Japan", 36.2, 138.3),
    ("Jordan", 30.6, 36.2),
    ("Kazakhstan", 48.0, 66.9),
    ("Kenya", -0.0, 37.9),
    ("Kiribati", 1.9, -157.4),
    ("Kosovo", 42.6, 20.9),
    ("Kuwait", 29.3, 47.5),
    ("Kyrgyzstan", 41.2, 74.8),
    ("Laos", 19.9, 102.5),
    ("Latvia", 56.9, 24.6),
    ("Lebanon", 33.9, 35.9),
    ("Lesotho", -29.6, 28.2),
    ("Liberia", 6.4, -9.4),
    ("Libya", 26.3, 17.2),
    ("Liechtenstein", 47.2, 9.6),
    ("Lithuania", 55.2, 23.9),
    ("Luxembourg", 49.8, 6.1),
    ("Madagascar", -18.8, 46.9),
    ("Malawi", -13.3, 34.3),
    ("Malaysia", 4.2, 102.0),
    ("Maldives", 3.2, 73.2),
    ("Mali", 17.6, -4.0),
    ("Malta", 35.9, 14.4),
    ("Marshall Islands", 7.1, 171.2),
    ("Mauritania", 21.0, -10.9),
    ("Mauritius", -20.3, 57.6),
    ("Mexico", 23.6, -102.6),
    ("Micronesia", 7.4, 150.6),
    ("Moldova", 47.4, 28.4),
    ("Monaco", 43.7, 7.4),
    ("Mongolia", 46.9, 103.8),
    ("Montenegro", 42.7, 19.4),
    ("Morocco", 31.8, -7.1),
    ("Mozambique", -18.7, 35.5),
    ("Myanmar", 21.9, 95.96),
    ("Namibia", -22.96, 18.5),
    ("Nauru", -0.5, 166.9),
    ("Nepal", 28.4, 84.1),
    ("Netherlands", 52.1, 5.3),
    ("New Zealand", -40.9, 174.9),
    ("Nicaragua", 12.9, -85.2),
    ("Niger", 17.6, 8.1),
    ("Nigeria", 9.1, 8.7),
    ("North Korea", 40.3, 127.5),
    ("North Macedonia", 41.6, 21.7),
    ("Norway", 60.5, 8.5),
    ("Oman", 21.5, 55.9),
    ("Pakistan", 30.4, 69.3),
    ("Palau", 7.5, 134.6),
    ("Palestine", 31.9, 35.2),
    ("Panama", 8.5, -80.8),
    ("Papua New Guinea", -6.3, 143.96),
    ("Paraguay", -23.4, -58.4),
    ("Peru", -9.2, -75.0),
    ("Philippines", 12.9, 121.8),
    ("Poland", 51.9, 19.1),
    ("Portugal", 39.4, -8.2),
    ("Puerto Rico", 18.2, -66.6),
    ("Qatar", 25.4, 51.2),
    ("Romania", 45.9, 24.97),
    ("Russia", 61.5, 105.3),
    ("Rwanda", -1.9, 29.9),
    ("Saint Kitts and Nevis", 17.4, -62.8),
    ("Saint Lucia", 13.9, -61.0),
    ("Saint Vincent and the Grenadines", 12.98, -61.3),
    ("Samoa", -13.8, -172.1),
    ("San Marino", 43.9, 12.5),
    ("Sao Tome and Principe", 0.2, 6.6),
    ("Saudi Arabia", 23.9, 45.1),
    ("Senegal", 14.5, -14.5),
    ("Serbia", 44.0, 21.0),
    ("Seychelles", -4.7, 55.5),
    ("Sierra Leone", 8.5, -11.8),
    ("Singapore", 1.35, 103.8),
    ("Slovakia", 48.7, 19.7),
    ("Slovenia", 46.2, 14.99),
    ("Solomon Islands", -9.6, 160.2),
    ("Somalia", 5.2, 46.2),
    ("South Africa", -30.6, 22.9),
    ("South Korea", 35.9, 127.8),
    ("South Sudan", 6.9, 31.3),
    ("Spain", 40.5, -3.7),
    ("Sri Lanka", 7.9, 80.8),
    ("Sudan", 12.9, 30.2),
    ("Suriname", 3.9, -56.0),
    ("Sweden", 60.1, 18.6),
    ("Switzerland", 46.8, 8.2),
    ("Syria", 34.8, 38.99),
    ("Taiwan", 23.7, 121.0),
    ("Tajikistan", 38.9, 71.3),
    ("Tanzania", -6.4, 34.9),
    ("Thailand", 15.9, 100.99),
    ("Timor-Leste", -8.9, 125.7),
    ("Togo", 8.6, 0.8),
    ("Tonga", -21.2, -175.2),
    ("Trinidad and Tobago", 10.7, -61.2),
    ("Tunisia", 33.9, 9.5),
    ("Turkey", 38.96, 35.2),
    ("Turkmenistan", 38.97, 59.6),
    ("Tuvalu", -7.1, 177.6),
    ("Uganda", 1.4, 32.3),
    ("Ukraine", 48.4, 31.2),
    ("United Arab Emirates", 23.4, 53.8),
    ("United Kingdom", 55.4, -3.4),
    ("United States", 37.1, -95.7),
    ("Uruguay", -32.5, -55.8),
    ("Uzbekistan", 41.4, 64.6),
    ("Vanuatu", -15.4, 166.96),
    ("Venezuela", 6.4, -66.6),
    ("Vietnam", 14.1, 108.3),
    ("Western Sahara", 24.2, -12.9),
    ("Yemen", 15.6, 48.5),
    ("Zambia", -13.1, 27.8),
    ("Zimbabwe", -19.0, 29.2),
];

/// (alternative spelling, name in `CENTROIDS`)
const ALIASES: &[(&str, &str)] = &[
    ("Bahamas, The", "Bahamas"),
    ("The Bahamas", "Bahamas"),
    ("Bolivia (Plurinational State of)", "Bolivia"),
    ("Brunei Darussalam", "Brunei"),
    ("Burma", "Myanmar"),
    ("Cape Verde", "Cabo Verde"),
    ("Congo, Rep.", "Congo"),
    ("Republic of the Congo", "Congo"),
    ("Congo, Dem. Rep.", "Democratic Republic of the Congo"),
    ("DR Congo", "Democratic Republic of the Congo"),
    ("Ivory Coast", "Cote d'Ivoire"),
    ("Czech Republic", "Czechia"),
    ("Egypt, Arab Rep.", "Egypt"),
    ("Swaziland", "Eswatini"),
    ("Gambia, The", "Gambia"),
    ("Hong Kong SAR, China", "Hong Kong"),
    ("Iran (Islamic Republic of)", "Iran"),
    ("Iran, Islamic Rep.", "Iran"),
    ("Korea, Dem. People's Rep.", "North Korea"),
    ("Democratic People's Republic of Korea", "North Korea"),
    ("Korea, Rep.", "South Korea"),
    ("Republic of Korea", "South Korea"),
    ("Korea", "South Korea"),
    ("Kyrgyz Republic", "Kyrgyzstan"),
    ("Lao PDR", "Laos"),
    ("Lao People's Democratic Republic", "Laos"),
    ("Micronesia (Federated States of)", "Micronesia"),
    ("Micronesia, Fed. Sts.", "Micronesia"),
    ("Republic of Moldova", "Moldova"),
    ("Macedonia", "North Macedonia"),
    ("State of Palestine", "Palestine"),
    ("West Bank and Gaza", "Palestine"),
    ("West Bank", "Palestine"),
    ("Republic of Serbia", "Serbia"),
    ("Russian Federation", "Russia"),
    ("St. Kitts and Nevis", "Saint Kitts and Nevis"),
    ("St. Lucia", "Saint Lucia"),
    ("St. Vincent and the Grenadines", "Saint Vincent and the Grenadines"),
    ("Slovak Republic", "Slovakia"),
    ("Syrian Arab Republic", "Syria"),
    ("United Republic of Tanzania", "Tanzania"),
    ("East Timor", "Timor-Leste"),
    ("Turkiye", "Turkey"),
    ("UAE", "United Arab Emirates"),
    ("UK", "United Kingdom"),
    ("Great Britain", "United Kingdom"),
    ("United Kingdom of Great Britain and Northern Ireland", "United Kingdom"),
    ("United States of America", "United States"),
    ("USA", "United States"),
    ("US", "United States"),
    ("Venezuela (Bolivarian Republic of)", "Venezuela"),
    ("Venezuela, RB", "Venezuela"),
    ("Viet Nam", "Vietnam"),
    ("Yemen, Rep.", "Yemen"),
];

/// Name lookup over the built-in centroid table.
pub struct Gazetteer {
    /// Normalized canonical name to centroid
    index: HashMap<String, GeoPoint>,
    /// Normalized alias to normalized canonical name
    aliases: HashMap<String, String>,
}

impl Gazetteer {
    /// Shared instance, built on first use.
    pub fn builtin() -> &'static Gazetteer {
        static GAZETTEER: OnceLock<Gazetteer> = OnceLock::new();
        GAZETTEER.get_or_init(Self::build)
    }

    fn build() -> Self {
        let index: HashMap<String, GeoPoint> = CENTROIDS
            .iter()
            .map(|&(name, latitude, longitude)| {
                (
                    normalize(name),
                    GeoPoint {
                        latitude,
                        longitude,
                    },
                )
            })
            .collect();

        let aliases = ALIASES
            .iter()
            .map(|&(alias, canonical)| (normalize(alias), normalize(canonical)))
            .filter(|(_, canonical)| index.contains_key(canonical))
            .collect();

        Self { index, aliases }
    }

    /// Lookup key for a country name: normalized, with aliases folded onto
    /// the canonical spelling. Unknown names keep their normalized form.
    pub fn key(&self, country: &str) -> String {
        let name = normalize(country);
        match self.aliases.get(&name) {
            Some(canonical) => canonical.clone(),
            None => name,
        }
    }

    pub fn resolve(&self, country: &str) -> Option<GeoPoint> {
        self.index.get(&self.key(country)).copied()
    }
}

/// Lowercase, fold common accents, and reduce punctuation runs to single spaces.
fn normalize(name: &str) -> String {
    let folded: String = name
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            c if c.is_alphanumeric() => c,
            '\'' | '’' => '\0',
            _ => ' ',
        })
        .filter(|&c| c != '\0')
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
