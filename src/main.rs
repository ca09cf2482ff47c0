use chrono::Utc;
use pedido_domain::{espera, status};
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use trajeto::stubs::horario_siempre_abierto;
use trajeto::{StoreConfigSource, TrajetoService};
use uuid::Uuid;

/// Pequeño menú interactivo para administrar trayectorias y pedidos
/// usando el repositorio proporcionado por `pedido-persistence`.
///
/// Opciones soportadas:
/// 1) Ver trayectoria por defecto
/// 2) Sembrar trayectoria por defecto (si está vacía)
/// 3) Ver pedidos activos
/// 4) Crear pedido de prueba
/// 5) Personalizar trayectoria de un pedido
/// 6) Restablecer trayectoria de un pedido
/// 7) Cancelar pedido
/// 8) Ejecutar scheduler (N barridos)
/// 9) Salir
fn main() -> Result<(), Box<dyn Error>> {
    // Inicializar repo (aplica migraciones embebidas si procede)
    let repo = Arc::new(pedido_persistence::new_from_env().map_err(|e| Box::new(e) as Box<dyn Error>)?);
    let service = TrajetoService::new(repo.clone(), repo.clone(), repo.clone());

    loop {
        println!("\n== Trajeto CLI menu ==");
        println!("1) Ver trayectoria por defecto");
        println!("2) Sembrar trayectoria por defecto (si está vacía)");
        println!("3) Ver pedidos activos");
        println!("4) Crear pedido de prueba");
        println!("5) Personalizar trayectoria de un pedido");
        println!("6) Restablecer trayectoria de un pedido");
        println!("7) Cancelar pedido");
        println!("8) Ejecutar scheduler (N barridos)");
        println!("9) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => {
                match service.default_trajectory() {
                    Ok(pasos) if pasos.is_empty() => println!("(trayectoria por defecto vacía; opción 2 para sembrar)"),
                    Ok(pasos) => {
                        println!("\nORDEM | DE                   | A                    | ESPERA");
                        println!("----------------------------------------------------------------");
                        for p in pasos {
                            println!("{:>5} | {:<20} | {:<20} | {}",
                                     p.ordem(),
                                     p.status_atual().as_raw(),
                                     p.proximo_status(),
                                     espera::humanize(p.minutos_espera()));
                        }
                    }
                    Err(e) => eprintln!("Error listando trayectoria: {}", e),
                }
            }
            "2" => {
                match service.seed_default_if_empty() {
                    Ok(true) => println!("Trayectoria por defecto sembrada"),
                    Ok(false) => println!("Ya había trayectoria por defecto; no se sembró"),
                    Err(e) => eprintln!("Error sembrando trayectoria: {}", e),
                }
                // Horario de demo para que el scheduler pueda aplicar
                if repo.get_business_hours().map(|h| h.is_empty()).unwrap_or(false) {
                    match repo.set_business_hours(&horario_siempre_abierto()) {
                        Ok(()) => println!("Horario de demo configurado (siempre abierto)"),
                        Err(e) => eprintln!("Error configurando horario: {}", e),
                    }
                }
            }
            "3" => {
                match service.list_pedidos_ativos() {
                    Ok(pedidos) => {
                        println!("\nID                                   | STATUS               | DESDE");
                        println!("---------------------------------------------------------------------------");
                        for p in pedidos {
                            println!("{} | {:<20} | {}", p.pedido_id, status::label(&p.status), p.status_desde);
                        }
                    }
                    Err(e) => eprintln!("Error listando pedidos: {}", e),
                }
            }
            "4" => {
                match service.create_pedido(status::CONFIRMADO, Utc::now()) {
                    Ok(id) => println!("Pedido creado: {}", id),
                    Err(e) => eprintln!("Error creando pedido: {}", e),
                }
            }
            "5" => {
                let id_s = prompt("Pedido id (UUID): ")?;
                let id = match Uuid::parse_str(id_s.trim()) {
                    Ok(u) => u,
                    Err(_) => { eprintln!("UUID inválido"); continue; }
                };
                match service.customize_pedido(&id) {
                    Ok(pasos) => println!("Trayectoria custom creada con {} pasos (copia de la default)", pasos.len()),
                    Err(e) => eprintln!("Error personalizando pedido: {}", e),
                }
            }
            "6" => {
                let id_s = prompt("Pedido id (UUID): ")?;
                let id = match Uuid::parse_str(id_s.trim()) {
                    Ok(u) => u,
                    Err(_) => { eprintln!("UUID inválido"); continue; }
                };
                match service.reset_pedido(&id) {
                    Ok(()) => println!("Pedido restablecido a la trayectoria por defecto"),
                    Err(e) => eprintln!("Error restableciendo pedido: {}", e),
                }
            }
            "7" => {
                let id_s = prompt("Pedido id (UUID) a cancelar: ")?;
                let id = match Uuid::parse_str(id_s.trim()) {
                    Ok(u) => u,
                    Err(_) => { eprintln!("UUID inválido"); continue; }
                };
                let confirm = prompt(&format!("Confirma cancelación de {}? escribir 'yes' para confirmar: ", id))?;
                if confirm.trim().to_lowercase() == "yes" {
                    match service.cancel_pedido(&id, Utc::now()) {
                        Ok(()) => println!("Pedido cancelado: {}", id),
                        Err(e) => eprintln!("Error cancelando pedido: {}", e),
                    }
                } else {
                    println!("Cancelación abortada");
                }
            }
            "8" => {
                let n_s = prompt("Cantidad de barridos (número entero): ")?;
                let barridos: u32 = match n_s.trim().parse() {
                    Ok(n) => n,
                    Err(_) => { eprintln!("Número inválido"); continue; }
                };
                let int_s = prompt("Intervalo entre barridos en segundos (enter para 30): ")?;
                let intervalo: u64 = if int_s.trim().is_empty() {
                    30
                } else {
                    match int_s.trim().parse() {
                        Ok(n) => n,
                        Err(_) => { eprintln!("Intervalo inválido"); continue; }
                    }
                };
                // Un solo loop conductor por despliegue: barre los pedidos
                // vencidos en vez de mantener un timer por pedido.
                for i in 1..=barridos {
                    let resumen = service.tick(Utc::now());
                    println!("barrido {}/{}: {} aplicados, {} pendientes, {} diferidos, {} fallos",
                             i,
                             barridos,
                             resumen.aplicados.len(),
                             resumen.pendientes,
                             resumen.diferidos,
                             resumen.fallos.len());
                    for (pedido, novo) in &resumen.aplicados {
                        println!("  {} -> {}", pedido, status::label(novo));
                    }
                    for (pedido, e) in &resumen.fallos {
                        eprintln!("  fallo en {}: {}", pedido, e);
                    }
                    if i < barridos {
                        thread::sleep(Duration::from_secs(intervalo));
                    }
                }
            }
            "9" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
