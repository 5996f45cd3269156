// src/specs/login.rs
//! Reading rules for the login page (`/auth/Account/Login`).
//!
//! The form carries the identifier input (`#txtIdentificacao`), the secret
//! input (`#senha`) and hidden inputs such as the anti-forgery token. We post
//! back every hidden input untouched plus the two credential fields.

use crate::config::consts::{IDENTIFIER_FIELD_ID, SECRET_FIELD_ID};
use crate::core::html::{attr, opener, openers, tag_blocks};
use crate::model::Credential;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginForm {
    /// As written in the page; may be relative or empty (= post to self).
    pub action: String,
    pub hidden: Vec<(String, String)>,
    pub identifier_name: String,
    pub secret_name: String,
}

impl LoginForm {
    /// Form body for `credential`, hidden fields first.
    pub fn fields(&self, credential: &Credential) -> Vec<(String, String)> {
        let mut out = self.hidden.clone();
        out.push((self.identifier_name.clone(), credential.identifier.clone()));
        out.push((self.secret_name.clone(), credential.secret.clone()));
        out
    }
}

/// The form holding the identifier input, or `None` when the page has none.
pub fn parse_login_form(doc: &str) -> Option<LoginForm> {
    let form = tag_blocks(doc, "form").find(|f| find_field_name(f, IDENTIFIER_FIELD_ID).is_some())?;

    let identifier_name = find_field_name(form, IDENTIFIER_FIELD_ID)?;
    let secret_name = find_field_name(form, SECRET_FIELD_ID)?;

    let hidden = openers(form, "input")
        .into_iter()
        .filter(|i| attr(i, "type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")))
        .filter_map(|i| Some((attr(i, "name")?, attr(i, "value").unwrap_or_default())))
        .collect();

    Some(LoginForm {
        action: attr(opener(form), "action").unwrap_or_default(),
        hidden,
        identifier_name,
        secret_name,
    })
}

/// `name` of the input with `id`, falling back to the id itself.
fn find_field_name(form: &str, id: &str) -> Option<String> {
    openers(form, "input")
        .into_iter()
        .find(|i| attr(i, "id").as_deref() == Some(id))
        .map(|i| attr(i, "name").unwrap_or_else(|| s!(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN: &str = r#"
        <form id="busca" action="/busca"><input id="q" name="q"></form>
        <form method="post" action="/auth/Account/Login?ReturnUrl=%2Fcore">
          <input name="__RequestVerificationToken" type="hidden" value="tok&amp;123" />
          <input id="txtIdentificacao" name="Identificacao" type="text">
          <input id="senha" type="password" name="Senha">
          <input type="checkbox" name="Lembrar" value="true">
          <input type="hidden" name="Lembrar" value="false">
          <button type="submit">Entrar</button>
        </form>
    "#;

    #[test]
    fn reads_action_hidden_and_credential_fields() {
        let form = parse_login_form(LOGIN).unwrap();
        assert_eq!(form.action, "/auth/Account/Login?ReturnUrl=%2Fcore");
        assert_eq!(form.identifier_name, "Identificacao");
        assert_eq!(form.secret_name, "Senha");
        assert_eq!(
            form.hidden,
            vec![
                (s!("__RequestVerificationToken"), s!("tok&123")),
                (s!("Lembrar"), s!("false")),
            ]
        );

        let body = form.fields(&Credential::new("0042", "pw"));
        assert_eq!(body.len(), 4);
        assert_eq!(body[2], (s!("Identificacao"), s!("0042")));
        assert_eq!(body[3], (s!("Senha"), s!("pw")));
    }

    #[test]
    fn nameless_inputs_post_under_their_id() {
        let doc = r#"<form><input id="txtIdentificacao"><input id="senha"></form>"#;
        let form = parse_login_form(doc).unwrap();
        assert_eq!(form.identifier_name, "txtIdentificacao");
        assert_eq!(form.secret_name, "senha");
        assert_eq!(form.action, "");
    }

    #[test]
    fn no_form_after_login() {
        assert!(parse_login_form("<html><table></table></html>").is_none());
    }
}
