//! Integration tests for the form flows against a mock backend.

mod common;

use std::sync::Arc;

use common::{context_for, persisted_store, session_body, test_user, user_body, BACKEND_USER};
use gobarber_core::forms::{
    ForgotPasswordData, ForgotPasswordForm, ProfileData, ProfileForm, ResetPasswordData, ResetPasswordForm,
    SignInData, SignInForm, SubmitOutcome,
};
use gobarber_core::storage::{MemoryStore, USER_KEY};
use gobarber_core::{Route, ToastKind};
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn test_sign_in_redirects_to_dashboard() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/sessions")
        .with_status(200)
        .with_body(session_body("T1", &test_user()))
        .create_async()
        .await;

    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let form = SignInForm::new(context.clone());

    let outcome = form.submit(&SignInData::new("johndoe@example.com", "123456")).await;

    assert_eq!(outcome, SubmitOutcome::Redirect(Route::Dashboard));
    assert!(context.session().is_authenticated());
    assert!(context.toasts().is_empty());
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_sign_in_invalid_email_shows_field_error_only() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/sessions").expect(0).create_async().await;

    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let outcome = SignInForm::new(context.clone()).submit(&SignInData::new("not-valid-email", "123456")).await;

    match outcome {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors["email"], "Digite um e-mail válido");
        }
        other => panic!("Expected Invalid, got {:?}", other),
    }
    assert!(context.toasts().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sign_in_failure_shows_error_toast() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("POST", "/sessions").with_status(401).create_async().await;

    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let outcome = SignInForm::new(context.clone()).submit(&SignInData::new("johndoe@example.com", "wrong")).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    let toasts = context.toasts().messages();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].title, "Erro na autenticação");
    assert!(!context.session().is_authenticated());
}

#[tokio::test]
async fn test_profile_update_sends_details_and_refreshes_user() {
    let mut server = Server::new_async().await;
    let updated = test_user().with_name("John Tre");
    let mock = server
        .mock("PUT", "/profile")
        .match_header("authorization", "Bearer T1")
        .match_body(Matcher::Json(json!({ "name": "John Tre", "email": "johndoe@example.com" })))
        .with_status(200)
        .with_body(user_body(&updated))
        .create_async()
        .await;

    let store = persisted_store("T1", &test_user());
    let context = context_for(&server, store.clone());
    let form = ProfileForm::new(context.clone());

    let mut data = form.initial_data();
    assert_eq!(data.name, "John Doe");
    data.name = "John Tre".to_string();

    let outcome = form.submit(&data).await;

    mock.assert_async().await;
    assert_eq!(outcome, SubmitOutcome::Redirect(Route::Dashboard));
    assert_eq!(context.session().current_user(), Some(updated.clone()));
    assert_eq!(store.peek(USER_KEY), Some(user_body(&updated)));
    let toasts = context.toasts().messages();
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].title, "Perfil atualizado com sucesso!");
    assert_eq!(toasts[0].description.as_deref(), Some("Suas informações foram atualizadas."));
}

#[tokio::test]
async fn test_profile_update_with_password_change() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/profile")
        .match_body(Matcher::Json(json!({
            "name": "John Doe",
            "email": "johndoe@example.com",
            "oldPassword": "123456",
            "password": "654321",
            "passwordConfirmation": "654321",
        })))
        .with_status(200)
        .with_body(user_body(&test_user()))
        .create_async()
        .await;

    let context = context_for(&server, persisted_store("T1", &test_user()));
    let data = ProfileData {
        name: "John Doe".to_string(),
        email: "johndoe@example.com".to_string(),
        old_password: "123456".to_string(),
        password: "654321".to_string(),
        password_confirmation: "654321".to_string(),
    };

    let outcome = ProfileForm::new(context).submit(&data).await;

    mock.assert_async().await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_profile_update_persists_user_exactly_as_sent() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/profile")
        .with_status(200)
        .with_body(BACKEND_USER)
        .create_async()
        .await;

    let store = persisted_store("T1", &test_user());
    let context = context_for(&server, store.clone());
    let data = ProfileData { name: "Ana".to_string(), email: "a@b.com".to_string(), ..ProfileData::default() };

    let outcome = ProfileForm::new(context.clone()).submit(&data).await;

    assert_eq!(outcome, SubmitOutcome::Redirect(Route::Dashboard));
    assert_eq!(store.peek(USER_KEY).as_deref(), Some(BACKEND_USER));
    assert_eq!(context.session().current_user().unwrap().name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn test_profile_new_password_without_confirmation_is_invalid() {
    let mut server = Server::new_async().await;
    let mock = server.mock("PUT", "/profile").expect(0).create_async().await;

    let context = context_for(&server, persisted_store("T1", &test_user()));
    let data = ProfileData {
        name: "John Doe".to_string(),
        email: "johndoe@example.com".to_string(),
        password: "abc".to_string(),
        ..ProfileData::default()
    };

    match ProfileForm::new(context).submit(&data).await {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors["passwordConfirmation"], "Confirmação da nova senha não confere com a nova senha.");
        }
        other => panic!("Expected Invalid, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_profile_update_failure_keeps_user() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("PUT", "/profile").with_status(400).create_async().await;

    let context = context_for(&server, persisted_store("T1", &test_user()));
    let data = ProfileData { name: "Outro".to_string(), email: "outro@example.com".to_string(), ..ProfileData::default() };

    let outcome = ProfileForm::new(context.clone()).submit(&data).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(context.session().current_user(), Some(test_user()));
    assert_eq!(context.toasts().messages()[0].title, "Erro na atualização.");
}

#[tokio::test]
async fn test_change_avatar() {
    let mut server = Server::new_async().await;
    let updated = test_user().with_avatar_url("https://api.gobarber.app/files/new.png");
    let _mock = server
        .mock("PATCH", "/users/avatar")
        .match_header("authorization", "Bearer T1")
        .match_header("content-type", Matcher::Regex("multipart/form-data".to_string()))
        .with_status(200)
        .with_body(user_body(&updated))
        .create_async()
        .await;

    let context = context_for(&server, persisted_store("T1", &test_user()));
    let outcome = ProfileForm::new(context.clone()).change_avatar("new.png", vec![0x89, 0x50, 0x4e, 0x47]).await;

    assert_eq!(outcome, SubmitOutcome::Done);
    assert_eq!(context.session().current_user(), Some(updated));
    assert_eq!(context.toasts().messages()[0].title, "Avatar atualizado com sucesso!");
}

#[tokio::test]
async fn test_forgot_password() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/password/forgot")
        .match_body(Matcher::Json(json!({ "email": "johndoe@example.com" })))
        .with_status(204)
        .create_async()
        .await;

    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let data = ForgotPasswordData { email: "johndoe@example.com".to_string() };

    let outcome = ForgotPasswordForm::new(context.clone()).submit(&data).await;

    assert_eq!(outcome, SubmitOutcome::Redirect(Route::Dashboard));
    let toasts = context.toasts().messages();
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].title, "Recuperação de senha");
}

#[tokio::test]
async fn test_forgot_password_failure() {
    let mut server = Server::new_async().await;
    let _mock = server.mock("POST", "/password/forgot").with_status(500).create_async().await;

    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let data = ForgotPasswordData { email: "johndoe@example.com".to_string() };

    let outcome = ForgotPasswordForm::new(context.clone()).submit(&data).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(context.toasts().messages()[0].title, "Erro na recuperação de senha");
}

#[tokio::test]
async fn test_reset_password_uses_token_from_link() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/password/reset")
        .match_body(Matcher::Json(json!({
            "password": "123456",
            "passwordConfirmation": "123456",
            "token": "reset-token",
        })))
        .with_status(204)
        .create_async()
        .await;

    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let form = ResetPasswordForm::new(context, "/reset-password?token=reset-token");
    let data = ResetPasswordData { password: "123456".to_string(), password_confirmation: "123456".to_string() };

    let outcome = form.submit(&data).await;

    mock.assert_async().await;
    assert_eq!(outcome, SubmitOutcome::Redirect(Route::SignIn));
}

#[tokio::test]
async fn test_reset_password_without_token_shows_generic_toast() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/password/reset").expect(0).create_async().await;

    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let form = ResetPasswordForm::new(context.clone(), "/reset-password");
    let data = ResetPasswordData { password: "123456".to_string(), password_confirmation: "123456".to_string() };

    let outcome = form.submit(&data).await;

    mock.assert_async().await;
    assert_eq!(outcome, SubmitOutcome::Failed);
    let toasts = context.toasts().messages();
    assert_eq!(toasts[0].title, "Erro ao resetar senha.");
    assert_eq!(toasts[0].description.as_deref(), Some("Ocorreu um erro no reset da sua senha. Tente mais tarde."));
}

#[tokio::test]
async fn test_reset_password_mismatch_is_a_field_error() {
    let server = Server::new_async().await;
    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let form = ResetPasswordForm::new(context.clone(), "?token=abc");
    let data = ResetPasswordData { password: "123456".to_string(), password_confirmation: "000000".to_string() };

    match form.submit(&data).await {
        SubmitOutcome::Invalid(errors) => assert!(errors.contains_key("passwordConfirmation")),
        other => panic!("Expected Invalid, got {:?}", other),
    }
    assert!(context.toasts().is_empty());
}

#[tokio::test]
async fn test_reset_password_empty_confirmation_is_a_field_error() {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/password/reset").expect(0).create_async().await;

    let context = context_for(&server, Arc::new(MemoryStore::new()));
    let form = ResetPasswordForm::new(context.clone(), "?token=abc");
    let data = ResetPasswordData { password: "123456".to_string(), password_confirmation: String::new() };

    match form.submit(&data).await {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors["passwordConfirmation"], "Confirmação da nova senha não confere com a nova senha.");
        }
        other => panic!("Expected Invalid, got {:?}", other),
    }
    mock.assert_async().await;
    assert!(context.toasts().is_empty());
}
