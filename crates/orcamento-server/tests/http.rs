//! HTTP contract tests for the quote form and the JSON endpoint.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use orcamento_core::company::CompanyProfile;
use orcamento_server::build_router;
use orcamento_server::config::ServerConfig;
use orcamento_server::state::AppState;

fn build_test_app(output_dir: &std::path::Path) -> Router {
    let config = ServerConfig {
        bind: "127.0.0.1:0".parse().unwrap(),
        output_dir: output_dir.to_path_buf(),
        keep_pdfs: false,
        company: CompanyProfile::default(),
    };
    build_router(AppState::from_config(&config))
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/gerar-orcamento")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_text(resp: axum::response::Response) -> String {
    String::from_utf8(body_bytes(resp).await).unwrap()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn today_file_date() -> String {
    jiff::Zoned::now().date().strftime("%d-%m-%Y").to_string()
}

#[tokio::test]
async fn health_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_root_serves_the_form() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let html = body_text(resp).await;
    assert!(html.contains("name=\"nomeCliente\""));
}

#[tokio::test]
async fn valid_form_downloads_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(form_request(concat!(
            "nomeCliente=Maria&cpfCnpjCliente=&descricaoServico=Pintura",
            "&observacoes=&valorTotal=1000",
        )))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    let disposition = resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains(&format!("orcamento_Maria_{}.pdf", today_file_date())));

    let bytes = body_bytes(resp).await;
    assert!(bytes.starts_with(b"%PDF"));
    assert!(contains(&bytes, b"1000.00"), "cash amount missing from pdf");
    assert!(contains(&bytes, b"1050.00"), "card amount missing from pdf");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    for body in [
        "nomeCliente=&descricaoServico=Pintura&valorTotal=1000",
        "nomeCliente=Maria&descricaoServico=&valorTotal=1000",
        "nomeCliente=Maria&descricaoServico=Pintura&valorTotal=",
        "nomeCliente=Maria",
    ] {
        let resp = build_test_app(dir.path())
            .oneshot(form_request(body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {body}");
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(
            body_text(resp).await,
            "Por favor, preencha todos os campos obrigatórios."
        );
    }
}

#[tokio::test]
async fn non_numeric_total_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(form_request(
            "nomeCliente=Maria&descricaoServico=Pintura&valorTotal=abc",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("número válido"));
}

#[tokio::test]
async fn negative_total_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(form_request(
            "nomeCliente=Maria&descricaoServico=Pintura&valorTotal=-5",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("maior que zero"));
}

#[tokio::test]
async fn tax_id_length_is_checked() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(dir.path());

    let resp = app
        .clone()
        .oneshot(form_request(
            "nomeCliente=Maria&cpfCnpjCliente=123&descricaoServico=Pintura&valorTotal=1000",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("CPF"));

    for tax_id in ["12345678901", "12345678901234"] {
        let resp = app
            .clone()
            .oneshot(form_request(&format!(
                "nomeCliente=Maria&cpfCnpjCliente={tax_id}&descricaoServico=Pintura&valorTotal=1000"
            )))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "tax id {tax_id}");
    }
}

#[tokio::test]
async fn unsafe_client_name_gets_safe_filename() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(form_request(
            "nomeCliente=Jo%C3%A3o+%22X%22&descricaoServico=Pintura&valorTotal=1000",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("filename=\"orcamento_Jo_o__X__"));
    assert!(disposition.contains("filename*=UTF-8''orcamento_Jo%C3%A3o%20%22X%22_"));
}

#[tokio::test]
async fn json_endpoint_returns_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(json_request(serde_json::json!({
            "nomeCliente": "Maria",
            "cpfCnpjCliente": "12.345.678/0001-90",
            "descricaoServico": "Pintura",
            "valorTotal": 1000
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    let disposition = resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("filename=\"orcamento.pdf\""));
    assert!(body_bytes(resp).await.starts_with(b"%PDF"));
}

#[tokio::test]
async fn json_endpoint_validates_input() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(json_request(serde_json::json!({
            "nomeCliente": "Maria",
            "descricaoServico": "Pintura",
            "valorTotal": "abc"
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body["error"], "O valor total deve ser um número válido.");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/gerar-orcamento")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn unwritable_output_dir_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(&dir.path().join("missing"))
        .oneshot(form_request(
            "nomeCliente=Maria&descricaoServico=Pintura&valorTotal=1000",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(resp).await, "Erro interno ao gerar o orçamento.");
}

#[tokio::test]
async fn non_ascii_digit_tax_id_is_rejected_by_form() {
    let dir = tempfile::tempdir().unwrap();
    // "١٢٣٤٥٦٧٨٩٠١": eleven Arabic-Indic digits, percent-encoded.
    let tax_id = "%D9%A1%D9%A2%D9%A3%D9%A4%D9%A5%D9%A6%D9%A7%D9%A8%D9%A9%D9%A0%D9%A1";
    let resp = build_test_app(dir.path())
        .oneshot(form_request(&format!(
            "nomeCliente=Maria&cpfCnpjCliente={tax_id}&descricaoServico=Pintura&valorTotal=1000"
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("CPF"));
}

#[tokio::test]
async fn non_ascii_digit_tax_id_is_rejected_by_json_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let resp = build_test_app(dir.path())
        .oneshot(json_request(serde_json::json!({
            "nomeCliente": "Maria",
            "cpfCnpjCliente": "١٢٣٤٥٦٧٨٩٠١",
            "descricaoServico": "Pintura",
            "valorTotal": 1000
        })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(
        body["error"],
        "Por favor, insira um CPF (11 dígitos) ou CNPJ (14 dígitos) válido."
    );
}
