use std::fmt;

/// Color mode of the embedded UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI toggles carried on the main embed URL.
///
/// `Default` reproduces the stock embed configuration; [`to_query`]
/// renders the toggles as the fixed query string the main frame boots
/// with, in a stable key order.
///
/// [`to_query`]: EmbedSettings::to_query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSettings {
    pub allow_chat_creation: bool,
    pub can_add_people: bool,
    pub can_click_external_links: bool,
    pub can_click_internal_links: bool,
    pub condensed: bool,
    pub condensed_message_below_name: bool,
    pub ecp_login_popup: bool,
    pub mode: Theme,
    pub show_attach: bool,
    pub show_bookmark_message: bool,
    pub show_chat_search: bool,
    pub show_compose: bool,
    pub show_disable_input: bool,
    pub show_editor: bool,
    pub show_emoji: bool,
    pub show_info: bool,
    pub show_members: bool,
    pub show_hash_tag_popover: bool,
    pub show_cash_tag_popover: bool,
    pub show_profile_popover: bool,
    pub show_suppress_message: bool,
    pub show_system_messages: bool,
    pub show_title: bool,
    pub show_x_pod: bool,
    pub sound: bool,
    pub storage_access_prompt: bool,
    pub symphony_logo: bool,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            allow_chat_creation: true,
            can_add_people: false,
            can_click_external_links: false,
            can_click_internal_links: false,
            condensed: true,
            condensed_message_below_name: true,
            ecp_login_popup: false,
            mode: Theme::Light,
            show_attach: true,
            show_bookmark_message: true,
            show_chat_search: true,
            show_compose: true,
            show_disable_input: true,
            show_editor: true,
            show_emoji: true,
            show_info: true,
            show_members: true,
            show_hash_tag_popover: false,
            show_cash_tag_popover: true,
            show_profile_popover: true,
            show_suppress_message: true,
            show_system_messages: false,
            show_title: true,
            show_x_pod: true,
            sound: false,
            storage_access_prompt: false,
            symphony_logo: true,
        }
    }
}

impl EmbedSettings {
    /// Render the toggles as the embed query string, without a leading
    /// `?`. Key order is fixed so the rendering is deterministic.
    pub fn to_query(&self) -> String {
        let flags = [
            ("allowChatCreation", self.allow_chat_creation),
            ("canAddPeople", self.can_add_people),
            ("canClickExternalLinks", self.can_click_external_links),
            ("canClickInternalLinks", self.can_click_internal_links),
            ("condensed", self.condensed),
            ("condensedMessageBelowName", self.condensed_message_below_name),
            ("ecpLoginPopup", self.ecp_login_popup),
        ];
        let late_flags = [
            ("showAttach", self.show_attach),
            ("showBookmarkMessage", self.show_bookmark_message),
            ("showChatSearch", self.show_chat_search),
            ("showCompose", self.show_compose),
            ("showDisableInput", self.show_disable_input),
            ("showEditor", self.show_editor),
            ("showEmoji", self.show_emoji),
            ("showInfo", self.show_info),
            ("showMembers", self.show_members),
            ("showHashTagPopover", self.show_hash_tag_popover),
            ("showCashTagPopover", self.show_cash_tag_popover),
            ("showProfilePopover", self.show_profile_popover),
            ("showSuppressMessage", self.show_suppress_message),
            ("showSystemMessages", self.show_system_messages),
            ("showTitle", self.show_title),
            ("showXPod", self.show_x_pod),
            ("sound", self.sound),
            ("storageAccessPrompt", self.storage_access_prompt),
            ("symphonyLogo", self.symphony_logo),
        ];

        let mut query = String::new();
        for (key, value) in flags {
            push_pair(&mut query, key, if value { "true" } else { "false" });
        }
        push_pair(&mut query, "mode", self.mode.as_str());
        for (key, value) in late_flags {
            push_pair(&mut query, key, if value { "true" } else { "false" });
        }
        query
    }
}

fn push_pair(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(key);
    query.push('=');
    query.push_str(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_matches_stock_embed_configuration() {
        let expected = "allowChatCreation=true&canAddPeople=false&canClickExternalLinks=false\
&canClickInternalLinks=false&condensed=true&condensedMessageBelowName=true&ecpLoginPopup=false\
&mode=light&showAttach=true&showBookmarkMessage=true&showChatSearch=true&showCompose=true\
&showDisableInput=true&showEditor=true&showEmoji=true&showInfo=true&showMembers=true\
&showHashTagPopover=false&showCashTagPopover=true&showProfilePopover=true&showSuppressMessage=true\
&showSystemMessages=false&showTitle=true&showXPod=true&sound=false&storageAccessPrompt=false\
&symphonyLogo=true";
        assert_eq!(EmbedSettings::default().to_query(), expected);
    }

    #[test]
    fn overridden_toggles_render_in_place() {
        let settings = EmbedSettings {
            mode: Theme::Dark,
            sound: true,
            ..EmbedSettings::default()
        };
        let query = settings.to_query();
        assert!(query.contains("mode=dark"));
        assert!(query.contains("&sound=true&"));
    }
}
