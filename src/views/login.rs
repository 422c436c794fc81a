// ============================================================================
// LOGIN VIEW - Formulario de login / usuario conectado
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{input_value, on_click, on_submit, ElementBuilder};
use crate::viewmodels::LoginViewModel;

const USERNAME_INPUT_ID: &str = "login-username";
const PASSWORD_INPUT_ID: &str = "login-password";

pub fn render_login(vm: &LoginViewModel) -> Result<Element, JsValue> {
    let model = vm.model();

    if let Some(username) = &model.logged_in_as {
        let logout_button = ElementBuilder::new("button")?
            .class("btn btn-secondary")
            .attr("type", "button")?
            .text("Logout")
            .build();
        let vm_logout = vm.clone();
        on_click(&logout_button, move |_| {
            log::info!("👋 [LOGIN] Logout solicitado");
            vm_logout.logout();
        })?;

        return Ok(ElementBuilder::new("div")?
            .class("login-status")
            .child(
                ElementBuilder::new("span")?
                    .class("login-user")
                    .text(&format!("Logged in as {}", username))
                    .build(),
            )?
            .child(logout_button)?
            .build());
    }

    let username_input = ElementBuilder::new("input")?
        .id(USERNAME_INPUT_ID)?
        .attr("type", "text")?
        .attr("name", "username")?
        .attr("placeholder", "Username")?
        .attr("autocomplete", "username")?
        .attr("value", &model.username)?
        .flag("disabled", model.submitting)?
        .build();

    let password_input = ElementBuilder::new("input")?
        .id(PASSWORD_INPUT_ID)?
        .attr("type", "password")?
        .attr("name", "password")?
        .attr("placeholder", "Password")?
        .attr("autocomplete", "current-password")?
        .flag("disabled", model.submitting)?
        .build();

    let submit_button = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .flag("disabled", model.submitting)?
        .text(if model.submitting { "Logging in..." } else { "Login" })
        .build();

    let mut form = ElementBuilder::new("form")?
        .class("login-form")
        .child(username_input)?
        .child(password_input)?
        .child(submit_button)?;

    if let Some(error) = &model.error {
        form = form.child(
            ElementBuilder::new("p")?
                .class("login-error")
                .text(error)
                .build(),
        )?;
    }
    let form = form.build();

    let vm_submit = vm.clone();
    on_submit(&form, move || {
        // Los inputs no actualizan el modelo al teclear (evita re-render y
        // pérdida de foco); se leen al enviar
        vm_submit.set_username(&input_value(USERNAME_INPUT_ID).unwrap_or_default());
        vm_submit.set_password(&input_value(PASSWORD_INPUT_ID).unwrap_or_default());
        let vm = vm_submit.clone();
        spawn_local(async move {
            if let Err(e) = vm.submit().await {
                log::warn!("⚠️ [LOGIN] {}", e);
            }
        });
    })?;

    Ok(form)
}
