//! `AUTH LOGIN` (historical, no RFC): two base64 prompts, `Username:` then
//! `Password:`.

pub const USERNAME_PROMPT: &str = "Username:";
pub const PASSWORD_PROMPT: &str = "Password:";

pub fn encode_prompt(prompt: &str) -> String {
    mailproto_core::base64::encode(prompt.as_bytes())
}
