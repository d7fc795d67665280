//! Embedded ISO-4217 dataset
//!
//! Active currency entries (alpha code, numeric code, name, fraction
//! digits) plus the ISO-3166-1 alpha-2 country index used by
//! `Currency::of_country`. Fund codes (BOV, CHE, CHW, CLF, COU, MXV, USN,
//! UYI, UYW) are catalogued but not attached to countries, so a country
//! resolves to its circulating tender; countries with more than one
//! circulating currency are listed once per currency and do not resolve.

/// (alpha code, numeric code, display name, default fraction digits)
pub(crate) const CURRENCIES: &[(&str, i32, &str, u32)] = &[
    ("AED", 784, "UAE Dirham", 2),
    ("AFN", 971, "Afghani", 2),
    ("ALL", 8, "Lek", 2),
    ("AMD", 51, "Armenian Dram", 2),
    ("ANG", 532, "Netherlands Antillean Guilder", 2),
    ("AOA", 973, "Kwanza", 2),
    ("ARS", 32, "Argentine Peso", 2),
    ("AUD", 36, "Australian Dollar", 2),
    ("AWG", 533, "Aruban Florin", 2),
    ("AZN", 944, "Azerbaijan Manat", 2),
    ("BAM", 977, "Convertible Mark", 2),
    ("BBD", 52, "Barbados Dollar", 2),
    ("BDT", 50, "Taka", 2),
    ("BGN", 975, "Bulgarian Lev", 2),
    ("BHD", 48, "Bahraini Dinar", 3),
    ("BIF", 108, "Burundi Franc", 0),
    ("BMD", 60, "Bermudian Dollar", 2),
    ("BND", 96, "Brunei Dollar", 2),
    ("BOB", 68, "Boliviano", 2),
    ("BOV", 984, "Mvdol", 2),
    ("BRL", 986, "Brazilian Real", 2),
    ("BSD", 44, "Bahamian Dollar", 2),
    ("BTN", 64, "Ngultrum", 2),
    ("BWP", 72, "Pula", 2),
    ("BYN", 933, "Belarusian Ruble", 2),
    ("BZD", 84, "Belize Dollar", 2),
    ("CAD", 124, "Canadian Dollar", 2),
    ("CDF", 976, "Congolese Franc", 2),
    ("CHE", 947, "WIR Euro", 2),
    ("CHF", 756, "Swiss Franc", 2),
    ("CHW", 948, "WIR Franc", 2),
    ("CLF", 990, "Unidad de Fomento", 4),
    ("CLP", 152, "Chilean Peso", 0),
    ("CNY", 156, "Yuan Renminbi", 2),
    ("COP", 170, "Colombian Peso", 2),
    ("COU", 970, "Unidad de Valor Real", 2),
    ("CRC", 188, "Costa Rican Colon", 2),
    ("CUP", 192, "Cuban Peso", 2),
    ("CVE", 132, "Cabo Verde Escudo", 2),
    ("CZK", 203, "Czech Koruna", 2),
    ("DJF", 262, "Djibouti Franc", 0),
    ("DKK", 208, "Danish Krone", 2),
    ("DOP", 214, "Dominican Peso", 2),
    ("DZD", 12, "Algerian Dinar", 2),
    ("EGP", 818, "Egyptian Pound", 2),
    ("ERN", 232, "Nakfa", 2),
    ("ETB", 230, "Ethiopian Birr", 2),
    ("EUR", 978, "Euro", 2),
    ("FJD", 242, "Fiji Dollar", 2),
    ("FKP", 238, "Falkland Islands Pound", 2),
    ("GBP", 826, "Pound Sterling", 2),
    ("GEL", 981, "Lari", 2),
    ("GHS", 936, "Ghana Cedi", 2),
    ("GIP", 292, "Gibraltar Pound", 2),
    ("GMD", 270, "Dalasi", 2),
    ("GNF", 324, "Guinean Franc", 0),
    ("GTQ", 320, "Quetzal", 2),
    ("GYD", 328, "Guyana Dollar", 2),
    ("HKD", 344, "Hong Kong Dollar", 2),
    ("HNL", 340, "Lempira", 2),
    ("HTG", 332, "Gourde", 2),
    ("HUF", 348, "Forint", 2),
    ("IDR", 360, "Rupiah", 2),
    ("ILS", 376, "New Israeli Sheqel", 2),
    ("INR", 356, "Indian Rupee", 2),
    ("IQD", 368, "Iraqi Dinar", 3),
    ("IRR", 364, "Iranian Rial", 2),
    ("ISK", 352, "Iceland Krona", 0),
    ("JMD", 388, "Jamaican Dollar", 2),
    ("JOD", 400, "Jordanian Dinar", 3),
    ("JPY", 392, "Yen", 0),
    ("KES", 404, "Kenyan Shilling", 2),
    ("KGS", 417, "Som", 2),
    ("KHR", 116, "Riel", 2),
    ("KMF", 174, "Comorian Franc", 0),
    ("KPW", 408, "North Korean Won", 2),
    ("KRW", 410, "Won", 0),
    ("KWD", 414, "Kuwaiti Dinar", 3),
    ("KYD", 136, "Cayman Islands Dollar", 2),
    ("KZT", 398, "Tenge", 2),
    ("LAK", 418, "Lao Kip", 2),
    ("LBP", 422, "Lebanese Pound", 2),
    ("LKR", 144, "Sri Lanka Rupee", 2),
    ("LRD", 430, "Liberian Dollar", 2),
    ("LSL", 426, "Loti", 2),
    ("LYD", 434, "Libyan Dinar", 3),
    ("MAD", 504, "Moroccan Dirham", 2),
    ("MDL", 498, "Moldovan Leu", 2),
    ("MGA", 969, "Malagasy Ariary", 2),
    ("MKD", 807, "Denar", 2),
    ("MMK", 104, "Kyat", 2),
    ("MNT", 496, "Tugrik", 2),
    ("MOP", 446, "Pataca", 2),
    ("MRU", 929, "Ouguiya", 2),
    ("MUR", 480, "Mauritius Rupee", 2),
    ("MVR", 462, "Rufiyaa", 2),
    ("MWK", 454, "Malawi Kwacha", 2),
    ("MXN", 484, "Mexican Peso", 2),
    ("MXV", 979, "Mexican Unidad de Inversion", 2),
    ("MYR", 458, "Malaysian Ringgit", 2),
    ("MZN", 943, "Mozambique Metical", 2),
    ("NAD", 516, "Namibia Dollar", 2),
    ("NGN", 566, "Naira", 2),
    ("NIO", 558, "Cordoba Oro", 2),
    ("NOK", 578, "Norwegian Krone", 2),
    ("NPR", 524, "Nepalese Rupee", 2),
    ("NZD", 554, "New Zealand Dollar", 2),
    ("OMR", 512, "Rial Omani", 3),
    ("PAB", 590, "Balboa", 2),
    ("PEN", 604, "Sol", 2),
    ("PGK", 598, "Kina", 2),
    ("PHP", 608, "Philippine Peso", 2),
    ("PKR", 586, "Pakistan Rupee", 2),
    ("PLN", 985, "Zloty", 2),
    ("PYG", 600, "Guarani", 0),
    ("QAR", 634, "Qatari Rial", 2),
    ("RON", 946, "Romanian Leu", 2),
    ("RSD", 941, "Serbian Dinar", 2),
    ("RUB", 643, "Russian Ruble", 2),
    ("RWF", 646, "Rwanda Franc", 0),
    ("SAR", 682, "Saudi Riyal", 2),
    ("SBD", 90, "Solomon Islands Dollar", 2),
    ("SCR", 690, "Seychelles Rupee", 2),
    ("SDG", 938, "Sudanese Pound", 2),
    ("SEK", 752, "Swedish Krona", 2),
    ("SGD", 702, "Singapore Dollar", 2),
    ("SHP", 654, "Saint Helena Pound", 2),
    ("SLE", 925, "Leone", 2),
    ("SOS", 706, "Somali Shilling", 2),
    ("SRD", 968, "Surinam Dollar", 2),
    ("SSP", 728, "South Sudanese Pound", 2),
    ("STN", 930, "Dobra", 2),
    ("SVC", 222, "El Salvador Colon", 2),
    ("SYP", 760, "Syrian Pound", 2),
    ("SZL", 748, "Lilangeni", 2),
    ("THB", 764, "Baht", 2),
    ("TJS", 972, "Somoni", 2),
    ("TMT", 934, "Turkmenistan New Manat", 2),
    ("TND", 788, "Tunisian Dinar", 3),
    ("TOP", 776, "Pa'anga", 2),
    ("TRY", 949, "Turkish Lira", 2),
    ("TTD", 780, "Trinidad and Tobago Dollar", 2),
    ("TWD", 901, "New Taiwan Dollar", 2),
    ("TZS", 834, "Tanzanian Shilling", 2),
    ("UAH", 980, "Hryvnia", 2),
    ("UGX", 800, "Uganda Shilling", 0),
    ("USD", 840, "US Dollar", 2),
    ("USN", 997, "US Dollar (Next day)", 2),
    ("UYI", 940, "Uruguay Peso en Unidades Indexadas", 0),
    ("UYU", 858, "Peso Uruguayo", 2),
    ("UYW", 927, "Unidad Previsional", 4),
    ("UZS", 860, "Uzbekistan Sum", 2),
    ("VED", 926, "Bolivar Soberano (digital)", 2),
    ("VES", 928, "Bolivar Soberano", 2),
    ("VND", 704, "Dong", 0),
    ("VUV", 548, "Vatu", 0),
    ("WST", 882, "Tala", 2),
    ("XAF", 950, "CFA Franc BEAC", 0),
    ("XCD", 951, "East Caribbean Dollar", 2),
    ("XOF", 952, "CFA Franc BCEAO", 0),
    ("XPF", 953, "CFP Franc", 0),
    ("YER", 886, "Yemeni Rial", 2),
    ("ZAR", 710, "Rand", 2),
    ("ZMW", 967, "Zambian Kwacha", 2),
    ("ZWG", 924, "Zimbabwe Gold", 2),
];

/// (ISO-3166-1 alpha-2 country code, alpha currency code); countries with
/// several circulating currencies appear once per currency.
pub(crate) const COUNTRY_CURRENCIES: &[(&str, &str)] = &[
    ("AD", "EUR"),
    ("AE", "AED"),
    ("AF", "AFN"),
    ("AG", "XCD"),
    ("AI", "XCD"),
    ("AL", "ALL"),
    ("AM", "AMD"),
    ("AO", "AOA"),
    ("AR", "ARS"),
    ("AS", "USD"),
    ("AT", "EUR"),
    ("AU", "AUD"),
    ("AW", "AWG"),
    ("AX", "EUR"),
    ("AZ", "AZN"),
    ("BA", "BAM"),
    ("BB", "BBD"),
    ("BD", "BDT"),
    ("BE", "EUR"),
    ("BF", "XOF"),
    ("BG", "BGN"),
    ("BH", "BHD"),
    ("BI", "BIF"),
    ("BJ", "XOF"),
    ("BL", "EUR"),
    ("BM", "BMD"),
    ("BN", "BND"),
    ("BO", "BOB"),
    ("BQ", "USD"),
    ("BR", "BRL"),
    ("BS", "BSD"),
    ("BT", "BTN"),
    ("BT", "INR"),
    ("BW", "BWP"),
    ("BY", "BYN"),
    ("BZ", "BZD"),
    ("CA", "CAD"),
    ("CC", "AUD"),
    ("CD", "CDF"),
    ("CF", "XAF"),
    ("CG", "XAF"),
    ("CH", "CHF"),
    ("CI", "XOF"),
    ("CK", "NZD"),
    ("CL", "CLP"),
    ("CM", "XAF"),
    ("CN", "CNY"),
    ("CO", "COP"),
    ("CR", "CRC"),
    ("CU", "CUP"),
    ("CV", "CVE"),
    ("CW", "ANG"),
    ("CX", "AUD"),
    ("CY", "EUR"),
    ("CZ", "CZK"),
    ("DE", "EUR"),
    ("DJ", "DJF"),
    ("DK", "DKK"),
    ("DM", "XCD"),
    ("DO", "DOP"),
    ("DZ", "DZD"),
    ("EC", "USD"),
    ("EE", "EUR"),
    ("EG", "EGP"),
    ("EH", "MAD"),
    ("ER", "ERN"),
    ("ES", "EUR"),
    ("ET", "ETB"),
    ("FI", "EUR"),
    ("FJ", "FJD"),
    ("FK", "FKP"),
    ("FM", "USD"),
    ("FO", "DKK"),
    ("FR", "EUR"),
    ("GA", "XAF"),
    ("GB", "GBP"),
    ("GD", "XCD"),
    ("GE", "GEL"),
    ("GF", "EUR"),
    ("GG", "GBP"),
    ("GH", "GHS"),
    ("GI", "GIP"),
    ("GL", "DKK"),
    ("GM", "GMD"),
    ("GN", "GNF"),
    ("GP", "EUR"),
    ("GQ", "XAF"),
    ("GR", "EUR"),
    ("GT", "GTQ"),
    ("GU", "USD"),
    ("GW", "XOF"),
    ("GY", "GYD"),
    ("HK", "HKD"),
    ("HN", "HNL"),
    ("HR", "EUR"),
    ("HT", "HTG"),
    ("HT", "USD"),
    ("HU", "HUF"),
    ("ID", "IDR"),
    ("IE", "EUR"),
    ("IL", "ILS"),
    ("IM", "GBP"),
    ("IN", "INR"),
    ("IO", "USD"),
    ("IQ", "IQD"),
    ("IR", "IRR"),
    ("IS", "ISK"),
    ("IT", "EUR"),
    ("JE", "GBP"),
    ("JM", "JMD"),
    ("JO", "JOD"),
    ("JP", "JPY"),
    ("KE", "KES"),
    ("KG", "KGS"),
    ("KH", "KHR"),
    ("KI", "AUD"),
    ("KM", "KMF"),
    ("KN", "XCD"),
    ("KP", "KPW"),
    ("KR", "KRW"),
    ("KW", "KWD"),
    ("KY", "KYD"),
    ("KZ", "KZT"),
    ("LA", "LAK"),
    ("LB", "LBP"),
    ("LC", "XCD"),
    ("LI", "CHF"),
    ("LK", "LKR"),
    ("LR", "LRD"),
    ("LS", "LSL"),
    ("LS", "ZAR"),
    ("LT", "EUR"),
    ("LU", "EUR"),
    ("LV", "EUR"),
    ("LY", "LYD"),
    ("MA", "MAD"),
    ("MC", "EUR"),
    ("MD", "MDL"),
    ("ME", "EUR"),
    ("MF", "EUR"),
    ("MG", "MGA"),
    ("MH", "USD"),
    ("MK", "MKD"),
    ("ML", "XOF"),
    ("MM", "MMK"),
    ("MN", "MNT"),
    ("MO", "MOP"),
    ("MP", "USD"),
    ("MQ", "EUR"),
    ("MR", "MRU"),
    ("MS", "XCD"),
    ("MT", "EUR"),
    ("MU", "MUR"),
    ("MV", "MVR"),
    ("MW", "MWK"),
    ("MX", "MXN"),
    ("MY", "MYR"),
    ("MZ", "MZN"),
    ("NA", "NAD"),
    ("NA", "ZAR"),
    ("NC", "XPF"),
    ("NE", "XOF"),
    ("NF", "AUD"),
    ("NG", "NGN"),
    ("NI", "NIO"),
    ("NL", "EUR"),
    ("NO", "NOK"),
    ("NP", "NPR"),
    ("NR", "AUD"),
    ("NU", "NZD"),
    ("NZ", "NZD"),
    ("OM", "OMR"),
    ("PA", "PAB"),
    ("PA", "USD"),
    ("PE", "PEN"),
    ("PF", "XPF"),
    ("PG", "PGK"),
    ("PH", "PHP"),
    ("PK", "PKR"),
    ("PL", "PLN"),
    ("PM", "EUR"),
    ("PN", "NZD"),
    ("PR", "USD"),
    ("PS", "ILS"),
    ("PT", "EUR"),
    ("PW", "USD"),
    ("PY", "PYG"),
    ("QA", "QAR"),
    ("RE", "EUR"),
    ("RO", "RON"),
    ("RS", "RSD"),
    ("RU", "RUB"),
    ("RW", "RWF"),
    ("SA", "SAR"),
    ("SB", "SBD"),
    ("SC", "SCR"),
    ("SD", "SDG"),
    ("SE", "SEK"),
    ("SG", "SGD"),
    ("SH", "SHP"),
    ("SI", "EUR"),
    ("SJ", "NOK"),
    ("SK", "EUR"),
    ("SL", "SLE"),
    ("SM", "EUR"),
    ("SN", "XOF"),
    ("SO", "SOS"),
    ("SR", "SRD"),
    ("SS", "SSP"),
    ("ST", "STN"),
    ("SV", "SVC"),
    ("SV", "USD"),
    ("SX", "ANG"),
    ("SY", "SYP"),
    ("SZ", "SZL"),
    ("TC", "USD"),
    ("TD", "XAF"),
    ("TF", "EUR"),
    ("TG", "XOF"),
    ("TH", "THB"),
    ("TJ", "TJS"),
    ("TK", "NZD"),
    ("TL", "USD"),
    ("TM", "TMT"),
    ("TN", "TND"),
    ("TO", "TOP"),
    ("TR", "TRY"),
    ("TT", "TTD"),
    ("TV", "AUD"),
    ("TW", "TWD"),
    ("TZ", "TZS"),
    ("UA", "UAH"),
    ("UG", "UGX"),
    ("UM", "USD"),
    ("US", "USD"),
    ("UY", "UYU"),
    ("UZ", "UZS"),
    ("VA", "EUR"),
    ("VC", "XCD"),
    ("VE", "VES"),
    ("VG", "USD"),
    ("VI", "USD"),
    ("VN", "VND"),
    ("VU", "VUV"),
    ("WF", "XPF"),
    ("WS", "WST"),
    ("YE", "YER"),
    ("YT", "EUR"),
    ("ZA", "ZAR"),
    ("ZM", "ZMW"),
    ("ZW", "ZWG"),
];
