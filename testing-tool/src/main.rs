use anyhow::{anyhow, Result};
use colored::*;
use serde_json::json;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚗 CarAssist Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: URL base del servidor
    let base_url = read_line("Base URL (enter = http://localhost:3000): ")?;
    let base_url = if base_url.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        base_url.trim_end_matches('/').to_string()
    };

    let client = reqwest::Client::new();

    // Paso 2: Autenticarse y obtener token
    let token = authenticate(&client, &base_url).await?;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Crear coche de prueba");
        println!("2. 📄 Listar coches");
        println!("3. 🔔 Chequear caducidades");
        println!("4. 🔧 Buscar mecánicos cercanos");
        println!("5. 🚪 Salir");
        let choice = read_line("Selecciona una opción (1-5): ")?;

        match choice.as_str() {
            "1" => test_create_car(&client, &base_url, &token).await?,
            "2" => test_list_cars(&client, &base_url, &token).await?,
            "3" => test_expiry_check(&client, &base_url, &token).await?,
            "4" => test_search_mechanics(&client, &base_url).await?,
            "5" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
            }
        }
    }

    Ok(())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

async fn authenticate(client: &reqwest::Client, base_url: &str) -> Result<String> {
    println!("{}", "🔐 CREDENCIALES".bright_cyan().bold());
    println!("{}", "================".bright_cyan());

    let email = read_line("Email: ")?;
    let password = read_line("Password: ")?;

    // Intentar login; si el usuario no existe, ofrecer registro
    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;

    if response.status().is_success() {
        let body: serde_json::Value = response.json().await?;
        let token = body["token"]
            .as_str()
            .ok_or_else(|| anyhow!("Respuesta de login sin token"))?
            .to_string();
        println!("{}", "✅ Login correcto".bright_green());
        return Ok(token);
    }

    println!("{}", "⚠️ Login falló, registrando usuario nuevo...".bright_yellow());

    let full_name = read_line("Nombre completo: ")?;
    let phone = read_line("Teléfono: ")?;

    let response = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&json!({
            "full_name": full_name,
            "email": email,
            "phone": phone,
            "password": password
        }))
        .send()
        .await?;

    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if !status.is_success() {
        return Err(anyhow!("Registro falló ({}): {}", status, body));
    }

    let token = body["token"]
        .as_str()
        .ok_or_else(|| anyhow!("Respuesta de registro sin token"))?
        .to_string();

    println!("{}", "✅ Usuario registrado".bright_green());
    Ok(token)
}

async fn test_create_car(client: &reqwest::Client, base_url: &str, token: &str) -> Result<()> {
    let car_name = read_line("Nombre del coche (ej. Swift): ")?;
    let registration = read_line("Matrícula (ej. MH12AB1234): ")?;
    let puc_expiry = read_line("Caducidad PUC YYYY-MM-DD (enter = ninguna): ")?;
    let insurance_expiry = read_line("Caducidad seguro YYYY-MM-DD (enter = ninguna): ")?;

    let mut payload = json!({
        "car_name": car_name,
        "registration_number": registration
    });
    if !puc_expiry.is_empty() {
        payload["puc_expiry"] = json!(puc_expiry);
    }
    if !insurance_expiry.is_empty() {
        payload["insurance_expiry"] = json!(insurance_expiry);
    }

    let response = client
        .post(format!("{}/api/car", base_url))
        .bearer_auth(token)
        .json(&payload)
        .send()
        .await?;

    print_response("Crear coche", response).await
}

async fn test_list_cars(client: &reqwest::Client, base_url: &str, token: &str) -> Result<()> {
    let response = client
        .get(format!("{}/api/car", base_url))
        .bearer_auth(token)
        .send()
        .await?;

    print_response("Listar coches", response).await
}

async fn test_expiry_check(client: &reqwest::Client, base_url: &str, token: &str) -> Result<()> {
    let response = client
        .get(format!("{}/api/notification/expiry-check", base_url))
        .bearer_auth(token)
        .send()
        .await?;

    print_response("Chequeo de caducidades", response).await
}

async fn test_search_mechanics(client: &reqwest::Client, base_url: &str) -> Result<()> {
    let lat = read_line("Latitud (ej. 19.0760): ")?;
    let lng = read_line("Longitud (ej. 72.8777): ")?;
    let radius = read_line("Radio en metros (enter = 3000): ")?;

    let mut url = format!("{}/api/mechanics?lat={}&lng={}", base_url, lat, lng);
    if !radius.is_empty() {
        url.push_str(&format!("&radius={}", radius));
    }

    let response = client.get(url).send().await?;

    print_response("Buscar mecánicos", response).await
}

async fn print_response(label: &str, response: reqwest::Response) -> Result<()> {
    let status = response.status();
    let body: serde_json::Value = response.json().await.unwrap_or(json!({}));

    if status.is_success() {
        println!("{} {} {}", "✅".bright_green(), label.bold(), status);
    } else {
        println!("{} {} {}", "❌".bright_red(), label.bold(), status);
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
