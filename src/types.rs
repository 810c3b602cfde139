//! Core value types shared by containers and gateway responses

use crate::currency::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interface language of the payment page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "PL")]
    Pl,
    #[serde(rename = "EN")]
    En,
}

impl Language {
    /// Parse a language code case-insensitively.
    ///
    /// Anything other than `pl`/`en` is treated as unset.
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "PL" => Some(Self::Pl),
            "EN" => Some(Self::En),
            _ => None,
        }
    }

    /// Upper-case code sent in form fields
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pl => "PL",
            Self::En => "EN",
        }
    }

    /// Lower-case form used in URL paths
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Pl => "pl",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Amount of money in a given currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub value: Decimal,
    pub currency_code: Currency,
}

impl Amount {
    pub fn new(value: Decimal, currency_code: Currency) -> Self {
        Self {
            value,
            currency_code,
        }
    }

    /// Value as rendered for signatures and form fields (`10.00` -> `10`)
    pub fn value_string(&self) -> String {
        render_decimal(self.value)
    }
}

/// Render a decimal without trailing zeros, `.` as separator.
pub fn render_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Personal data of the payer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house: Option<String>,
    #[serde(default)]
    pub flat: Option<String>,
}

impl PersonalData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn with_house(mut self, house: impl Into<String>) -> Self {
        self.house = Some(house.into());
        self
    }

    pub fn with_flat(mut self, flat: impl Into<String>) -> Self {
        self.flat = Some(flat.into());
        self
    }

    /// Fields in wire order, paired with their form names
    pub(crate) fn fields(&self) -> [(&'static str, Option<&str>); 9] {
        [
            ("personalData.firstName", self.first_name.as_deref()),
            ("personalData.surname", self.surname.as_deref()),
            ("personalData.email", self.email.as_deref()),
            ("personalData.country", self.country.as_deref()),
            ("personalData.city", self.city.as_deref()),
            ("personalData.postcode", self.postcode.as_deref()),
            ("personalData.street", self.street.as_deref()),
            ("personalData.house", self.house.as_deref()),
            ("personalData.flat", self.flat.as_deref()),
        ]
    }
}
