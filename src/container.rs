//! Request and notification containers
//!
//! A container holds everything one gateway operation needs. Containers that
//! carry a secret phrase implement [`Signable`]; the signature is always
//! computed from the container's state at the moment it is sent.

use crate::channel::Channel;
use crate::crypto::{Signable, SignatureScheme};
use crate::currency::Currency;
use crate::types::{render_decimal, Amount, Language, PersonalData};
use rust_decimal::Decimal;
use std::fmt;

/// Shared secret between the shop and the gateway. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretPhrase(String);

impl SecretPhrase {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl From<&str> for SecretPhrase {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for SecretPhrase {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

/// Preferred payment channel: either a bare id or a full channel description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentChannel {
    Id(String),
    Channel(Channel),
}

impl PaymentChannel {
    /// Id sent to the gateway in both cases
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Channel(channel) => channel.id(),
        }
    }

    pub fn as_channel(&self) -> Option<&Channel> {
        match self {
            Self::Id(_) => None,
            Self::Channel(channel) => Some(channel),
        }
    }
}

impl From<Channel> for PaymentChannel {
    fn from(channel: Channel) -> Self {
        Self::Channel(channel)
    }
}

impl From<&str> for PaymentChannel {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for PaymentChannel {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

/// Data common to a payment request and a transaction description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentData {
    pub title: String,
    pub amount: Amount,
    pub description: Option<String>,
    pub additional_data: Option<String>,
    pub channel: Option<PaymentChannel>,
    pub personal_data: PersonalData,
}

impl PaymentData {
    pub fn new(title: impl Into<String>, amount: Amount) -> Self {
        Self {
            title: title.into(),
            amount,
            description: None,
            additional_data: None,
            channel: None,
            personal_data: PersonalData::default(),
        }
    }
}

/// Everything needed to create a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentContainer {
    secret_phrase: SecretPhrase,
    shop_id: String,
    data: PaymentData,
    return_url: Option<String>,
    negative_return_url: Option<String>,
    language: Option<Language>,
    referer: Option<String>,
}

impl PaymentContainer {
    pub fn new(
        secret_phrase: impl Into<SecretPhrase>,
        shop_id: impl Into<String>,
        title: impl Into<String>,
        amount_value: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            secret_phrase: secret_phrase.into(),
            shop_id: shop_id.into(),
            data: PaymentData::new(title, Amount::new(amount_value, currency)),
            return_url: None,
            negative_return_url: None,
            language: None,
            referer: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.data.description = Some(description.into());
        self
    }

    pub fn with_additional_data(mut self, additional_data: impl Into<String>) -> Self {
        self.data.additional_data = Some(additional_data.into());
        self
    }

    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn with_negative_return_url(mut self, negative_return_url: impl Into<String>) -> Self {
        self.negative_return_url = Some(negative_return_url.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<PaymentChannel>) -> Self {
        self.data.channel = Some(channel.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_personal_data(mut self, personal_data: PersonalData) -> Self {
        self.data.personal_data = personal_data;
        self
    }

    pub fn set_return_url(&mut self, return_url: Option<String>) {
        self.return_url = return_url;
    }

    pub fn set_negative_return_url(&mut self, negative_return_url: Option<String>) {
        self.negative_return_url = negative_return_url;
    }

    pub fn set_channel(&mut self, channel: Option<PaymentChannel>) {
        self.data.channel = channel;
    }

    /// Set the language from a raw code; unknown codes leave it unset
    pub fn set_language(&mut self, code: Option<&str>) {
        self.language = code.and_then(Language::parse);
    }

    pub fn set_referer(&mut self, referer: Option<String>) {
        self.referer = referer;
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn data(&self) -> &PaymentData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut PaymentData {
        &mut self.data
    }

    pub fn personal_data_mut(&mut self) -> &mut PersonalData {
        &mut self.data.personal_data
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    pub fn amount(&self) -> &Amount {
        &self.data.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.data.amount.currency_code
    }

    pub fn channel(&self) -> Option<&PaymentChannel> {
        self.data.channel.as_ref()
    }

    pub fn email(&self) -> Option<&str> {
        self.data.personal_data.email.as_deref()
    }

    pub fn return_url(&self) -> Option<&str> {
        self.return_url.as_deref()
    }

    pub fn negative_return_url(&self) -> Option<&str> {
        self.negative_return_url.as_deref()
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn referer(&self) -> Option<&str> {
        self.referer.as_deref()
    }

    /// Named fields in signing order, `None` for absent optional values
    pub fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        let data = &self.data;
        let mut fields = vec![
            ("title", Some(data.title.clone())),
            ("amount.value", Some(render_decimal(data.amount.value))),
            ("amount.currencyCode", Some(data.amount.currency_code.to_string())),
            ("returnUrl", self.return_url.clone()),
            ("description", data.description.clone()),
            ("negativeReturnUrl", self.negative_return_url.clone()),
            ("additionalData", data.additional_data.clone()),
            ("paymentChannel", data.channel.as_ref().map(|c| c.id().to_string())),
            ("languageCode", self.language.map(|l| l.code().to_string())),
            ("referer", self.referer.clone()),
        ];
        fields.extend(
            data.personal_data
                .fields()
                .into_iter()
                .map(|(name, value)| (name, value.map(str::to_string))),
        );
        fields
    }
}

impl Signable for PaymentContainer {
    const SCHEME: SignatureScheme = SignatureScheme::Sha1;

    fn canonical_fields(&self) -> Vec<String> {
        self.fields()
            .into_iter()
            .map(|(_, value)| value.unwrap_or_default())
            .collect()
    }

    fn secret_phrase(&self) -> &str {
        self.secret_phrase.expose()
    }
}

/// Query for the state of an existing transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInfoContainer {
    secret_phrase: SecretPhrase,
    shop_id: String,
    order_id: String,
    language: Option<Language>,
}

impl TransactionInfoContainer {
    pub fn new(
        secret_phrase: impl Into<SecretPhrase>,
        shop_id: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            secret_phrase: secret_phrase.into(),
            shop_id: shop_id.into(),
            order_id: order_id.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Set the language from a raw code; unknown codes leave it unset
    pub fn set_language(&mut self, code: Option<&str>) {
        self.language = code.and_then(Language::parse);
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }
}

impl Signable for TransactionInfoContainer {
    const SCHEME: SignatureScheme = SignatureScheme::Sha1;

    fn canonical_fields(&self) -> Vec<String> {
        vec![self.order_id.clone()]
    }

    fn secret_phrase(&self) -> &str {
        self.secret_phrase.expose()
    }
}

/// New success/failure return URLs for an existing transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReturnUrlsContainer {
    secret_phrase: SecretPhrase,
    shop_id: String,
    order_id: String,
    return_url: String,
    negative_return_url: String,
}

impl UpdateReturnUrlsContainer {
    pub fn new(
        secret_phrase: impl Into<SecretPhrase>,
        shop_id: impl Into<String>,
        order_id: impl Into<String>,
        return_url: impl Into<String>,
        negative_return_url: impl Into<String>,
    ) -> Self {
        Self {
            secret_phrase: secret_phrase.into(),
            shop_id: shop_id.into(),
            order_id: order_id.into(),
            return_url: return_url.into(),
            negative_return_url: negative_return_url.into(),
        }
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    pub fn negative_return_url(&self) -> &str {
        &self.negative_return_url
    }
}

impl Signable for UpdateReturnUrlsContainer {
    const SCHEME: SignatureScheme = SignatureScheme::Sha1;

    fn canonical_fields(&self) -> Vec<String> {
        vec![
            self.order_id.clone(),
            self.return_url.clone(),
            self.negative_return_url.clone(),
        ]
    }

    fn secret_phrase(&self) -> &str {
        self.secret_phrase.expose()
    }
}

/// Query for the channels available to a shop. Unsigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelsContainer {
    shop_id: String,
    language: Option<Language>,
}

impl ChannelsContainer {
    pub fn new(shop_id: impl Into<String>) -> Self {
        Self {
            shop_id: shop_id.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn set_language(&mut self, code: Option<&str>) {
        self.language = code.and_then(Language::parse);
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }
}

/// Inbound notification as posted by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContainer {
    secret_phrase: SecretPhrase,
    cmd: String,
    args: String,
    sign: String,
}

impl NotificationContainer {
    pub fn new(
        secret_phrase: impl Into<SecretPhrase>,
        cmd: impl Into<String>,
        args: impl Into<String>,
        sign: impl Into<String>,
    ) -> Self {
        Self {
            secret_phrase: secret_phrase.into(),
            cmd: cmd.into(),
            args: args.into(),
            sign: sign.into(),
        }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Arguments exactly as received, comma-joined
    pub fn raw_args(&self) -> &str {
        &self.args
    }

    /// Arguments split on `,`
    pub fn args(&self) -> Vec<&str> {
        self.args.split(',').collect()
    }

    /// Signature supplied by the gateway
    pub fn sign(&self) -> &str {
        &self.sign
    }
}

impl Signable for NotificationContainer {
    const SCHEME: SignatureScheme = SignatureScheme::Md5;

    fn canonical_fields(&self) -> Vec<String> {
        vec![self.cmd.clone(), self.args.clone()]
    }

    fn secret_phrase(&self) -> &str {
        self.secret_phrase.expose()
    }
}

/// Borrowed view of any outbound container, handed to request builders
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    Payment(&'a PaymentContainer),
    TransactionInfo(&'a TransactionInfoContainer),
    Channels(&'a ChannelsContainer),
    UpdateReturnUrls(&'a UpdateReturnUrlsContainer),
}

impl Container<'_> {
    /// Type name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Payment(_) => "PaymentContainer",
            Self::TransactionInfo(_) => "TransactionInfoContainer",
            Self::Channels(_) => "ChannelsContainer",
            Self::UpdateReturnUrls(_) => "UpdateReturnUrlsContainer",
        }
    }
}

impl<'a> From<&'a PaymentContainer> for Container<'a> {
    fn from(container: &'a PaymentContainer) -> Self {
        Self::Payment(container)
    }
}

impl<'a> From<&'a TransactionInfoContainer> for Container<'a> {
    fn from(container: &'a TransactionInfoContainer) -> Self {
        Self::TransactionInfo(container)
    }
}

impl<'a> From<&'a ChannelsContainer> for Container<'a> {
    fn from(container: &'a ChannelsContainer) -> Self {
        Self::Channels(container)
    }
}

impl<'a> From<&'a UpdateReturnUrlsContainer> for Container<'a> {
    fn from(container: &'a UpdateReturnUrlsContainer) -> Self {
        Self::UpdateReturnUrls(container)
    }
}
