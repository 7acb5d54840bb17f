//! Sign-up controller.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AddAccount, AddAccountModel};
use crate::presentation::errors::{InvalidParamError, MissingParamError};
use crate::presentation::helpers::{bad_request, ok, server_error};
use crate::presentation::protocols::{
    Controller, EmailValidator, HttpRequest, HttpResponse,
};

/// Checked in this order, first missing one wins.
const REQUIRED_FIELDS: [&str; 4] =
    ["name", "email", "password", "passwordConfirmation"];

/// Handle account registration requests.
pub struct SignUpController {
    email_validator: Box<dyn EmailValidator>,
    add_account: Box<dyn AddAccount>,
}

impl SignUpController {
    pub fn new(
        email_validator: Box<dyn EmailValidator>,
        add_account: Box<dyn AddAccount>,
    ) -> Self {
        Self {
            email_validator,
            add_account,
        }
    }
}

/// Absent, `null` and `""` all count as missing.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn field<'a>(
    body: &'a Value,
    name: &'static str,
) -> Result<&'a str, InvalidParamError> {
    body.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| InvalidParamError::new(name))
}

/// Validate the body and build the use case input.
fn build_account(body: &Value) -> Result<(AddAccountModel, &str), HttpResponse> {
    if let Some(missing) = REQUIRED_FIELDS
        .into_iter()
        .find(|name| is_missing(body.get(name)))
    {
        return Err(bad_request(MissingParamError::new(missing)));
    }

    let name = field(body, "name").map_err(bad_request)?;
    let email = field(body, "email").map_err(bad_request)?;
    let password = field(body, "password").map_err(bad_request)?;
    let confirmation =
        field(body, "passwordConfirmation").map_err(bad_request)?;

    if password != confirmation {
        return Err(bad_request(InvalidParamError::new(
            "passwordConfirmation",
        )));
    }

    Ok((
        AddAccountModel {
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        },
        email,
    ))
}

#[async_trait]
impl Controller for SignUpController {
    async fn handle(&self, request: HttpRequest) -> HttpResponse {
        let (account, email) = match build_account(&request.body) {
            Ok(input) => input,
            Err(response) => return response,
        };

        match self.email_validator.is_valid(email) {
            Ok(true) => (),
            Ok(false) => return bad_request(InvalidParamError::new("email")),
            Err(err) => return server_error(err.stack()),
        }

        match self.add_account.add(account).await {
            Ok(account) => ok(&account),
            Err(err) => server_error(err.stack()),
        }
    }
}
