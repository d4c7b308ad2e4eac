//! ISO 4217 currency allow-list.
//!
//! Every currency code an adapter emits must be listed here. Codes are
//! declared once through `define_currencies!`, which generates the
//! `CurrencyCode` enum together with its lookup and display helpers.
//!
//! # Adding a New Currency
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     XYZ => ("XYZ", "Example Dollar"),
//! }
//! ```

/// Macro to define the currency allow-list.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     VariantName => ("CODE", "English name"),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $label:literal)
        ),* $(,)?
    ) => {
        /// A currency code from the ISO 4217 allow-list.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $(
                #[doc = $label]
                $name
            ),*
        }

        impl CurrencyCode {
            /// The three-letter code.
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            /// The English currency name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $label),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }

            /// Exact lookup of an upper-case three-letter code.
            ///
            /// Feed values are matched verbatim; anything not in the
            /// allow-list yields `None`.
            pub fn parse_code(code: &str) -> Option<CurrencyCode> {
                match code {
                    $($code => Some(CurrencyCode::$name),)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                CurrencyCode::parse_code(s.trim().to_uppercase().as_str())
                    .ok_or_else(|| format!("Unknown currency: {}", s))
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    AED => ("AED", "UAE Dirham"),
    AFN => ("AFN", "Afghani"),
    ALL => ("ALL", "Lek"),
    AMD => ("AMD", "Armenian Dram"),
    ANG => ("ANG", "Netherlands Antillean Guilder"),
    AOA => ("AOA", "Kwanza"),
    ARS => ("ARS", "Argentine Peso"),
    AUD => ("AUD", "Australian Dollar"),
    AWG => ("AWG", "Aruban Florin"),
    AZN => ("AZN", "Azerbaijan Manat"),
    BAM => ("BAM", "Convertible Mark"),
    BBD => ("BBD", "Barbados Dollar"),
    BDT => ("BDT", "Taka"),
    BGN => ("BGN", "Bulgarian Lev"),
    BHD => ("BHD", "Bahraini Dinar"),
    BIF => ("BIF", "Burundi Franc"),
    BMD => ("BMD", "Bermudian Dollar"),
    BND => ("BND", "Brunei Dollar"),
    BOB => ("BOB", "Boliviano"),
    BRL => ("BRL", "Brazilian Real"),
    BSD => ("BSD", "Bahamian Dollar"),
    BTN => ("BTN", "Ngultrum"),
    BWP => ("BWP", "Pula"),
    BYN => ("BYN", "Belarusian Ruble"),
    BZD => ("BZD", "Belize Dollar"),
    CAD => ("CAD", "Canadian Dollar"),
    CDF => ("CDF", "Congolese Franc"),
    CHF => ("CHF", "Swiss Franc"),
    CLP => ("CLP", "Chilean Peso"),
    CNY => ("CNY", "Yuan Renminbi"),
    COP => ("COP", "Colombian Peso"),
    CRC => ("CRC", "Costa Rican Colon"),
    CUP => ("CUP", "Cuban Peso"),
    CVE => ("CVE", "Cabo Verde Escudo"),
    CZK => ("CZK", "Czech Koruna"),
    DJF => ("DJF", "Djibouti Franc"),
    DKK => ("DKK", "Danish Krone"),
    DOP => ("DOP", "Dominican Peso"),
    DZD => ("DZD", "Algerian Dinar"),
    EGP => ("EGP", "Egyptian Pound"),
    ERN => ("ERN", "Nakfa"),
    ETB => ("ETB", "Ethiopian Birr"),
    EUR => ("EUR", "Euro"),
    FJD => ("FJD", "Fiji Dollar"),
    FKP => ("FKP", "Falkland Islands Pound"),
    GBP => ("GBP", "Pound Sterling"),
    GEL => ("GEL", "Lari"),
    GHS => ("GHS", "Ghana Cedi"),
    GIP => ("GIP", "Gibraltar Pound"),
    GMD => ("GMD", "Dalasi"),
    GNF => ("GNF", "Guinean Franc"),
    GTQ => ("GTQ", "Quetzal"),
    GYD => ("GYD", "Guyana Dollar"),
    HKD => ("HKD", "Hong Kong Dollar"),
    HNL => ("HNL", "Lempira"),
    HTG => ("HTG", "Gourde"),
    HUF => ("HUF", "Forint"),
    IDR => ("IDR", "Rupiah"),
    ILS => ("ILS", "New Israeli Sheqel"),
    INR => ("INR", "Indian Rupee"),
    IQD => ("IQD", "Iraqi Dinar"),
    IRR => ("IRR", "Iranian Rial"),
    ISK => ("ISK", "Iceland Krona"),
    JMD => ("JMD", "Jamaican Dollar"),
    JOD => ("JOD", "Jordanian Dinar"),
    JPY => ("JPY", "Yen"),
    KES => ("KES", "Kenyan Shilling"),
    KGS => ("KGS", "Som"),
    KHR => ("KHR", "Riel"),
    KMF => ("KMF", "Comorian Franc"),
    KPW => ("KPW", "North Korean Won"),
    KRW => ("KRW", "Won"),
    KWD => ("KWD", "Kuwaiti Dinar"),
    KYD => ("KYD", "Cayman Islands Dollar"),
    KZT => ("KZT", "Tenge"),
    LAK => ("LAK", "Lao Kip"),
    LBP => ("LBP", "Lebanese Pound"),
    LKR => ("LKR", "Sri Lanka Rupee"),
    LRD => ("LRD", "Liberian Dollar"),
    LSL => ("LSL", "Loti"),
    LYD => ("LYD", "Libyan Dinar"),
    MAD => ("MAD", "Moroccan Dirham"),
    MDL => ("MDL", "Moldovan Leu"),
    MGA => ("MGA", "Malagasy Ariary"),
    MKD => ("MKD", "Denar"),
    MMK => ("MMK", "Kyat"),
    MNT => ("MNT", "Tugrik"),
    MOP => ("MOP", "Pataca"),
    MRU => ("MRU", "Ouguiya"),
    MUR => ("MUR", "Mauritius Rupee"),
    MVR => ("MVR", "Rufiyaa"),
    MWK => ("MWK", "Malawi Kwacha"),
    MXN => ("MXN", "Mexican Peso"),
    MYR => ("MYR", "Malaysian Ringgit"),
    MZN => ("MZN", "Mozambique Metical"),
    NAD => ("NAD", "Namibia Dollar"),
    NGN => ("NGN", "Naira"),
    NIO => ("NIO", "Cordoba Oro"),
    NOK => ("NOK", "Norwegian Krone"),
    NPR => ("NPR", "Nepalese Rupee"),
    NZD => ("NZD", "New Zealand Dollar"),
    OMR => ("OMR", "Rial Omani"),
    PAB => ("PAB", "Balboa"),
    PEN => ("PEN", "Sol"),
    PGK => ("PGK", "Kina"),
    PHP => ("PHP", "Philippine Peso"),
    PKR => ("PKR", "Pakistan Rupee"),
    PLN => ("PLN", "Zloty"),
    PYG => ("PYG", "Guarani"),
    QAR => ("QAR", "Qatari Rial"),
    RON => ("RON", "Romanian Leu"),
    RSD => ("RSD", "Serbian Dinar"),
    RUB => ("RUB", "Russian Ruble"),
    RWF => ("RWF", "Rwanda Franc"),
    SAR => ("SAR", "Saudi Riyal"),
    SBD => ("SBD", "Solomon Islands Dollar"),
    SCR => ("SCR", "Seychelles Rupee"),
    SDG => ("SDG", "Sudanese Pound"),
    SEK => ("SEK", "Swedish Krona"),
    SGD => ("SGD", "Singapore Dollar"),
    SHP => ("SHP", "Saint Helena Pound"),
    SLE => ("SLE", "Leone"),
    SOS => ("SOS", "Somali Shilling"),
    SRD => ("SRD", "Surinam Dollar"),
    SSP => ("SSP", "South Sudanese Pound"),
    STN => ("STN", "Dobra"),
    SVC => ("SVC", "El Salvador Colon"),
    SYP => ("SYP", "Syrian Pound"),
    SZL => ("SZL", "Lilangeni"),
    THB => ("THB", "Baht"),
    TJS => ("TJS", "Somoni"),
    TMT => ("TMT", "Turkmenistan New Manat"),
    TND => ("TND", "Tunisian Dinar"),
    TOP => ("TOP", "Pa'anga"),
    TRY => ("TRY", "Turkish Lira"),
    TTD => ("TTD", "Trinidad and Tobago Dollar"),
    TWD => ("TWD", "New Taiwan Dollar"),
    TZS => ("TZS", "Tanzanian Shilling"),
    UAH => ("UAH", "Hryvnia"),
    UGX => ("UGX", "Uganda Shilling"),
    USD => ("USD", "US Dollar"),
    UYU => ("UYU", "Peso Uruguayo"),
    UZS => ("UZS", "Uzbekistan Sum"),
    VES => ("VES", "Bolivar Soberano"),
    VND => ("VND", "Dong"),
    VUV => ("VUV", "Vatu"),
    WST => ("WST", "Tala"),
    XAF => ("XAF", "CFA Franc BEAC"),
    XCD => ("XCD", "East Caribbean Dollar"),
    XDR => ("XDR", "SDR (Special Drawing Right)"),
    XOF => ("XOF", "CFA Franc BCEAO"),
    XPF => ("XPF", "CFP Franc"),
    YER => ("YER", "Yemeni Rial"),
    ZAR => ("ZAR", "Rand"),
    ZMW => ("ZMW", "Zambian Kwacha"),
    ZWL => ("ZWL", "Zimbabwe Dollar"),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_is_exact() {
        assert_eq!(CurrencyCode::parse_code("USD"), Some(CurrencyCode::USD));
        assert_eq!(CurrencyCode::parse_code("usd"), None);
        assert_eq!(CurrencyCode::parse_code(" USD"), None);
        assert_eq!(CurrencyCode::parse_code("XXX"), None);
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert_eq!(" gbp ".parse::<CurrencyCode>().unwrap(), CurrencyCode::GBP);
        assert!("ZZZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_currency_code_display() {
        assert_eq!(CurrencyCode::USD.to_string(), "USD");
        assert_eq!(CurrencyCode::CZK.name(), "Czech Koruna");
    }

    #[test]
    fn test_all_codes_round_trip_and_are_sorted() {
        let all = CurrencyCode::all();
        assert!(all.len() > 150);
        for pair in all.windows(2) {
            assert!(pair[0].code() < pair[1].code());
        }
        for code in all {
            assert_eq!(CurrencyCode::parse_code(code.code()), Some(*code));
            assert_eq!(code.code().len(), 3);
        }
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&CurrencyCode::JPY).unwrap();
        assert_eq!(json, "\"JPY\"");
        let back: CurrencyCode = serde_json::from_str("\"CHF\"").unwrap();
        assert_eq!(back, CurrencyCode::CHF);
    }
}
