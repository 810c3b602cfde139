//! Payment channels offered by the gateway

use crate::currency::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A payment method (bank transfer, card, ...) with its currency restrictions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    id: String,
    name: String,
    available_currencies: Vec<Currency>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    logo_url: Option<String>,
}

impl Channel {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        available_currencies: Vec<Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            available_currencies,
            description: None,
            logo_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn available_currencies(&self) -> &[Currency] {
        &self.available_currencies
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }

    /// Whether payments in `currency` can go through this channel
    pub fn supports(&self, currency: &Currency) -> bool {
        self.available_currencies.contains(currency)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Channels keyed by id, iterated in insertion order.
///
/// Adding a channel whose id is already present drops the old entry and
/// appends the new one at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelCollection {
    channels: Vec<Channel>,
}

impl ChannelCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, channel: Channel) {
        self.remove(channel.id());
        self.channels.push(channel);
    }

    pub fn get(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|channel| channel.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Remove a channel by id, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<Channel> {
        let index = self.channels.iter().position(|channel| channel.id() == id)?;
        Some(self.channels.remove(index))
    }

    /// Remove every listed id
    pub fn remove_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            self.remove(id);
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    pub fn all(&self) -> &[Channel] {
        &self.channels
    }
}

impl FromIterator<Channel> for ChannelCollection {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut collection = Self::new();
        for channel in iter {
            collection.add(channel);
        }
        collection
    }
}

impl IntoIterator for ChannelCollection {
    type Item = Channel;
    type IntoIter = std::vec::IntoIter<Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChannelCollection {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}
