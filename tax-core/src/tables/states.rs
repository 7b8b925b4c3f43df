//! Flat marginal rates used to approximate each state's income tax.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// (postal code, name, rate)
pub const STATE_RATES: [(&str, &str, Decimal); 51] = [
    ("AL", "Alabama", dec!(0.05)),
    ("AK", "Alaska", dec!(0)),
    ("AZ", "Arizona", dec!(0.025)),
    ("AR", "Arkansas", dec!(0.044)),
    ("CA", "California", dec!(0.133)),
    ("CO", "Colorado", dec!(0.044)),
    ("CT", "Connecticut", dec!(0.0699)),
    ("DE", "Delaware", dec!(0.066)),
    ("DC", "District of Columbia", dec!(0.1075)),
    ("FL", "Florida", dec!(0)),
    ("GA", "Georgia", dec!(0.0539)),
    ("HI", "Hawaii", dec!(0.11)),
    ("ID", "Idaho", dec!(0.058)),
    ("IL", "Illinois", dec!(0.0495)),
    ("IN", "Indiana", dec!(0.0305)),
    ("IA", "Iowa", dec!(0.057)),
    ("KS", "Kansas", dec!(0.057)),
    ("KY", "Kentucky", dec!(0.04)),
    ("LA", "Louisiana", dec!(0.0425)),
    ("ME", "Maine", dec!(0.0715)),
    ("MD", "Maryland", dec!(0.0575)),
    ("MA", "Massachusetts", dec!(0.05)),
    ("MI", "Michigan", dec!(0.0425)),
    ("MN", "Minnesota", dec!(0.0985)),
    ("MS", "Mississippi", dec!(0.047)),
    ("MO", "Missouri", dec!(0.048)),
    ("MT", "Montana", dec!(0.059)),
    ("NE", "Nebraska", dec!(0.0584)),
    ("NV", "Nevada", dec!(0)),
    ("NH", "New Hampshire", dec!(0)),
    ("NJ", "New Jersey", dec!(0.1075)),
    ("NM", "New Mexico", dec!(0.059)),
    ("NY", "New York", dec!(0.109)),
    ("NC", "North Carolina", dec!(0.045)),
    ("ND", "North Dakota", dec!(0.025)),
    ("OH", "Ohio", dec!(0.035)),
    ("OK", "Oklahoma", dec!(0.0475)),
    ("OR", "Oregon", dec!(0.099)),
    ("PA", "Pennsylvania", dec!(0.0307)),
    ("RI", "Rhode Island", dec!(0.0599)),
    ("SC", "South Carolina", dec!(0.064)),
    ("SD", "South Dakota", dec!(0)),
    ("TN", "Tennessee", dec!(0)),
    ("TX", "Texas", dec!(0)),
    ("UT", "Utah", dec!(0.0465)),
    ("VT", "Vermont", dec!(0.0875)),
    ("VA", "Virginia", dec!(0.0575)),
    ("WA", "Washington", dec!(0)),
    ("WV", "West Virginia", dec!(0.0512)),
    ("WI", "Wisconsin", dec!(0.0765)),
    ("WY", "Wyoming", dec!(0)),
];
