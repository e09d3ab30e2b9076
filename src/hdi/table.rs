//! Frozen lookup data for the development-index choropleth.
//!
//! Values are the UN 2023 Human Development Index as published; boundary
//! names on the left of [`NAME_ALIASES`] are the spellings used by the world
//! GeoJSON dataset.

/// Canonical country name and its development index in `[0, 1]`.
pub const DEVELOPMENT_INDEX: &[(&str, f64)] = &[
    ("Iceland", 0.972),
    ("Norway", 0.970),
    ("Switzerland", 0.970),
    ("Denmark", 0.962),
    ("Germany", 0.959),
    ("Sweden", 0.959),
    ("Australia", 0.958),
    ("Hong Kong, China (SAR)", 0.955),
    ("Netherlands", 0.955),
    ("Belgium", 0.951),
    ("Ireland", 0.949),
    ("Finland", 0.948),
    ("Singapore", 0.946),
    ("United Kingdom", 0.946),
    ("United Arab Emirates", 0.940),
    ("Canada", 0.939),
    ("Liechtenstein", 0.938),
    ("New Zealand", 0.938),
    ("United States of America", 0.938),
    ("South Korea", 0.937),
    ("Slovenia", 0.931),
    ("Austria", 0.930),
    ("Japan", 0.925),
    ("Malta", 0.924),
    ("Luxembourg", 0.922),
    ("France", 0.920),
    ("Israel", 0.919),
    ("Spain", 0.918),
    ("Czechia", 0.915),
    ("Italy", 0.915),
    ("San Marino", 0.915),
    ("Andorra", 0.913),
    ("Cyprus", 0.913),
    ("Greece", 0.908),
    ("Poland", 0.906),
    ("Estonia", 0.905),
    ("Saudi Arabia", 0.900),
    ("Bahrain", 0.899),
    ("Lithuania", 0.895),
    ("Portugal", 0.890),
    ("Croatia", 0.889),
    ("Latvia", 0.889),
    ("Qatar", 0.886),
    ("Slovakia", 0.880),
    ("Chile", 0.878),
    ("Hungary", 0.870),
    ("Argentina", 0.865),
    ("Montenegro", 0.862),
    ("Uruguay", 0.862),
    ("Oman", 0.858),
    ("Türkiye", 0.853),
    ("Kuwait", 0.852),
    ("Antigua and Barbuda", 0.851),
    ("Seychelles", 0.848),
    ("Bulgaria", 0.845),
    ("Romania", 0.845),
    ("Georgia", 0.844),
    ("Saint Kitts and Nevis", 0.840),
    ("Panama", 0.839),
    ("Brunei", 0.837),
    ("Kazakhstan", 0.837),
    ("Costa Rica", 0.833),
    ("Republic of Serbia", 0.833),
    ("Russia", 0.832),
    ("Belarus", 0.824),
    ("Bahamas", 0.820),
    ("Malaysia", 0.819),
    ("Macedonia", 0.815),
    ("Armenia", 0.811),
    ("Barbados", 0.811),
    ("Albania", 0.810),
    ("Trinidad and Tobago", 0.807),
    ("Mauritius", 0.806),
    ("Bosnia and Herzegovina", 0.804),
    ("Iran (Islamic Republic of)", 0.799),
    ("Saint Vincent and the Grenadines", 0.798),
    ("Thailand", 0.798),
    ("China", 0.797),
    ("Peru", 0.794),
    ("Grenada", 0.791),
    ("Azerbaijan", 0.789),
    ("Mexico", 0.789),
    ("Colombia", 0.788),
    ("Brazil", 0.786),
    ("Palau", 0.786),
    ("Moldova", 0.785),
    ("Ukraine", 0.779),
    ("Ecuador", 0.777),
    ("Dominican Republic", 0.776),
    ("Guyana", 0.776),
    ("Sri Lanka", 0.776),
    ("Tonga", 0.769),
    ("Maldives", 0.766),
    ("Viet Nam", 0.766),
    ("Turkmenistan", 0.764),
    ("Algeria", 0.763),
    ("Cuba", 0.762),
    ("Dominica", 0.761),
    ("Paraguay", 0.756),
    ("Egypt", 0.754),
    ("Jordan", 0.754),
    ("Lebanon", 0.752),
    ("Saint Lucia", 0.748),
    ("Mongolia", 0.747),
    ("Tunisia", 0.746),
    ("Kosovo", 0.742),
    ("South Africa", 0.741),
    ("Uzbekistan", 0.740),
    ("Bolivia", 0.733),
    ("Gabon", 0.733),
    ("Marshall Islands", 0.733),
    ("Botswana", 0.731),
    ("Fiji", 0.731),
    ("Indonesia", 0.728),
    ("Suriname", 0.722),
    ("Belize", 0.721),
    ("Libya", 0.721),
    ("Jamaica", 0.720),
    ("Kyrgyzstan", 0.720),
    ("Philippines", 0.720),
    ("Morocco", 0.710),
    ("Venezuela (Bolivarian Republic of)", 0.709),
    ("Samoa", 0.708),
    ("Nicaragua", 0.706),
    ("Nauru", 0.703),
    ("Bhutan", 0.698),
    ("Eswatini (Kingdom of)", 0.695),
    ("Iraq", 0.695),
    ("Tajikistan", 0.691),
    ("Tuvalu", 0.689),
    ("Bangladesh", 0.685),
    ("India", 0.685),
    ("El Salvador", 0.678),
    ("Equatorial Guinea", 0.674),
    ("Palestine, State of", 0.674),
    ("Cabo Verde", 0.668),
    ("Namibia", 0.665),
    ("Guatemala", 0.662),
    ("Republic of the Congo", 0.649),
    ("Honduras", 0.645),
    ("Kiribati", 0.644),
    ("Sao Tome and Principe", 0.637),
    ("Timor-Leste", 0.634),
    ("Ghana", 0.628),
    ("Kenya", 0.628),
    ("Nepal", 0.622),
    ("Vanuatu", 0.621),
    ("Lao People's Democratic Republic", 0.617),
    ("Angola", 0.616),
    ("Micronesia (Federated States of)", 0.615),
    ("Myanmar", 0.609),
    ("Cambodia", 0.606),
    ("Comoros", 0.603),
    ("Zimbabwe", 0.598),
    ("Zambia", 0.595),
    ("Cameroon", 0.588),
    ("Solomon Islands", 0.584),
    ("Ivory Coast", 0.582),
    ("Uganda", 0.582),
    ("Rwanda", 0.578),
    ("Papua New Guinea", 0.576),
    ("Togo", 0.571),
    ("Syrian Arab Republic", 0.564),
    ("Mauritania", 0.563),
    ("Nigeria", 0.560),
    ("Tanzania (United Republic of)", 0.555),
    ("Haiti", 0.554),
    ("Lesotho", 0.550),
    ("Pakistan", 0.544),
    ("Senegal", 0.530),
    ("Gambia", 0.524),
    ("Congo (Democratic Republic of the)", 0.522),
    ("Malawi", 0.517),
    ("Benin", 0.515),
    ("Guinea Bissau", 0.514),
    ("Djibouti", 0.513),
    ("Sudan", 0.511),
    ("Liberia", 0.510),
    ("Eritrea", 0.503),
    ("Guinea", 0.500),
    ("Ethiopia", 0.497),
    ("Afghanistan", 0.496),
    ("Mozambique", 0.493),
    ("Madagascar", 0.487),
    ("Yemen", 0.470),
    ("Sierra Leone", 0.467),
    ("Burkina Faso", 0.459),
    ("Burundi", 0.439),
    ("Mali", 0.419),
    ("Niger", 0.419),
    ("Chad", 0.416),
    ("Central African Republic", 0.414),
    ("Somalia", 0.404),
    ("South Sudan", 0.388),
];

/// Boundary-dataset spelling and the canonical spelling used in
/// [`DEVELOPMENT_INDEX`].
pub const NAME_ALIASES: &[(&str, &str)] = &[
    ("Czech Republic", "Czechia"),
    ("Turkey", "Türkiye"),
    ("Congo", "Republic of the Congo"),
    ("Democratic Republic of the Congo", "Congo (Democratic Republic of the)"),
    ("Palestine", "Palestine, State of"),
    ("Tanzania", "Tanzania (United Republic of)"),
    ("Vietnam", "Viet Nam"),
    ("Swaziland", "Eswatini (Kingdom of)"),
    ("Iran", "Iran (Islamic Republic of)"),
    ("Venezuela", "Venezuela (Bolivarian Republic of)"),
    ("Laos", "Lao People's Democratic Republic"),
    ("Syria", "Syrian Arab Republic"),
];
