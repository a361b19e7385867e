use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use rs_regen_core::io::list_files;
use rs_regen_core::model::library::AUTOMATON_EXTENSION;
use rs_regen_core::{AutomatonLibrary, AutomatonModel, RandomWalker, WalkError};

use clap::Parser;

use config::ServerConfig;

mod config;

/// Upper bound on the number of strings returned by one request.
const MAX_COUNT: usize = 10_000;

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	name: String,
	min_length: Option<usize>,
	max_length: Option<usize>,
	seed: Option<u64>,
	count: Option<usize>,
	nb_try: Option<usize>,
}

#[derive(Deserialize)]
struct AutomataQuery {
	names: Option<String>,
}

struct SharedData {
	library: RwLock<AutomatonLibrary>,
	data_dir: PathBuf,
}

impl GenerateParams {
	/// Length range requested by the caller, if any.
	///
	/// Both bounds must be given together.
	fn bounds(&self) -> Result<Option<(usize, usize)>, String> {
		match (self.min_length, self.max_length) {
			(None, None) => Ok(None),
			(Some(min), Some(max)) if min <= max => Ok(Some((min, max))),
			(Some(min), Some(max)) => Err(format!("min_length ({}) must not exceed max_length ({})", min, max)),
			_ => Err("min_length and max_length must be given together".to_owned()),
		}
	}
}

/// Generates one string, retrying bounded walks up to `nb_try` more times.
///
/// Retrying belongs to the caller of the walker: a failed walk is a normal
/// outcome and a new walk continues from the walker's current random state.
fn generate_with_retries<A: AutomatonModel + ?Sized>(
	walker: &mut RandomWalker<'_, A>,
	bounds: Option<(usize, usize)>,
	nb_try: usize,
) -> Result<String, WalkError> {
	let Some((min_length, max_length)) = bounds else {
		return Ok(walker.generate());
	};

	let mut result = walker.generate_bounded(min_length, max_length);
	for _ in 0..nb_try {
		match result {
			Err(WalkError::InsufficientLength { .. } | WalkError::MaxLengthExceeded { .. }) => {
				result = walker.generate_bounded(min_length, max_length);
			}
			_ => break,
		}
	}
	result
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` strings (one per line) from the automaton `name`.
/// With `min_length` and `max_length`, every string is within that range;
/// with `seed`, the response is reproducible.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let bounds = match query.bounds() {
		Ok(bounds) => bounds,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let count = query.count.unwrap_or(1);
	if count == 0 || count > MAX_COUNT {
		return HttpResponse::BadRequest().body(format!("count must be between 1 and {}", MAX_COUNT));
	}
	let nb_try = query.nb_try.unwrap_or(5);

	let library = match data.library.read() {
		Ok(library) => library,
		Err(_) => return HttpResponse::InternalServerError().body("Library lock failed"),
	};
	let automaton = match library.get(&query.name) {
		Some(automaton) => automaton,
		None => return HttpResponse::NotFound().body(format!("Automaton '{}' is not loaded", query.name)),
	};

	let mut walker = match query.seed {
		Some(seed) => RandomWalker::with_seed(automaton, seed),
		None => RandomWalker::from_os_rng(automaton),
	};

	let mut lines = Vec::with_capacity(count);
	for _ in 0..count {
		match generate_with_retries(&mut walker, bounds, nb_try) {
			Ok(text) => lines.push(text),
			Err(e) => {
				log::info!("generation from '{}' failed after {} retries: {}", query.name, nb_try, e);
				return HttpResponse::UnprocessableEntity().body(e.to_string());
			}
		}
	}

	HttpResponse::Ok().body(lines.join("\n"))
}

/// HTTP GET endpoint `/v1/automata`: automata available in the data directory.
#[get("/v1/automata")]
async fn get_automata(data: web::Data<SharedData>) -> impl Responder {
	match list_files(&data.data_dir, AUTOMATON_EXTENSION) {
		Ok(files) => {
			let suffix = format!(".{}", AUTOMATON_EXTENSION);
			let names: Vec<&str> = files.iter().filter_map(|f| f.strip_suffix(&suffix)).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(e) => {
			log::warn!("failed to list {}: {}", data.data_dir.display(), e);
			HttpResponse::InternalServerError().body("Failed to list automata")
		}
	}
}

#[get("/v1/loaded_automata")]
async fn get_loaded_automata(data: web::Data<SharedData>) -> impl Responder {
	let library = match data.library.read() {
		Ok(library) => library,
		Err(_) => return HttpResponse::InternalServerError().body("Library lock failed"),
	};
	HttpResponse::Ok().body(library.names().join("\n"))
}

/// HTTP PUT endpoint `/v1/load_automata?names=a,b`
///
/// Replaces the loaded automata. The previous set stays active if any of
/// the requested files fails to load.
#[put("/v1/load_automata")]
async fn put_automata(data: web::Data<SharedData>, query: web::Query<AutomataQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty automaton name"),
	};

	let mut library = AutomatonLibrary::default();
	for name in query_names.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
		let path = data.data_dir.join(format!("{}.{}", name, AUTOMATON_EXTENSION));
		if let Err(e) = library.load(&path) {
			return HttpResponse::InternalServerError().body(format!("Failed to load automaton '{}': {}", name, e));
		}
	}

	match data.library.write() {
		Ok(mut shared) => *shared = library,
		Err(_) => return HttpResponse::InternalServerError().body("Library lock failed"),
	}

	HttpResponse::Ok().body("Automata loaded successfully")
}

/// Main entry point for the server.
///
/// Loads every automaton of the data directory, shares the library between
/// workers and starts an Actix-web HTTP server.
///
/// # Notes
/// - Settings come from flags or the environment (see `ServerConfig`).
/// - A missing data directory is not fatal: the server starts empty and
///   automata can be loaded later through `/v1/load_automata`.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::init();

	let config = ServerConfig::parse();

	let library = match AutomatonLibrary::new(&config.data_dir) {
		Ok(library) => library,
		Err(e) => {
			log::warn!("starting without automata: {}", e);
			AutomatonLibrary::default()
		}
	};
	log::info!("serving {} automata on {}:{}", library.len(), config.host, config.port);

	let shared_data = web::Data::new(SharedData {
		library: RwLock::new(library),
		data_dir: config.data_dir.clone(),
	});

	HttpServer::new(move || {
		App::new()
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_automata)
			.service(put_automata)
			.service(get_loaded_automata)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use rs_regen_core::Automaton;

	fn shared_data(data_dir: PathBuf) -> web::Data<SharedData> {
		let mut library = AutomatonLibrary::default();
		library.insert("ab", Automaton::literal("ab"));
		web::Data::new(SharedData { library: RwLock::new(library), data_dir })
	}

	async fn get(data: &web::Data<SharedData>, uri: &str) -> (StatusCode, String) {
		let app = test::init_service(
			App::new()
				.app_data(data.clone())
				.service(get_generated)
				.service(get_automata)
				.service(get_loaded_automata)
				.service(put_automata),
		)
		.await;
		let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
		let status = resp.status();
		let body = test::read_body(resp).await;
		(status, String::from_utf8_lossy(&body).to_string())
	}

	#[actix_web::test]
	async fn generates_strings() {
		let data = shared_data(PathBuf::from("."));
		assert_eq!(get(&data, "/v1/generate?name=ab").await, (StatusCode::OK, "ab".to_owned()));
		assert_eq!(
			get(&data, "/v1/generate?name=ab&count=3&seed=1&min_length=2&max_length=4").await,
			(StatusCode::OK, "ab\nab\nab".to_owned())
		);
		assert_eq!(
			get(&data, "/v1/generate?name=ab&seed=1&min_length=0&max_length=18446744073709551615").await,
			(StatusCode::OK, "ab".to_owned())
		);
	}

	#[actix_web::test]
	async fn rejects_bad_requests() {
		let data = shared_data(PathBuf::from("."));
		assert_eq!(get(&data, "/v1/generate?name=missing").await.0, StatusCode::NOT_FOUND);
		assert_eq!(get(&data, "/v1/generate?name=ab&min_length=2").await.0, StatusCode::BAD_REQUEST);
		assert_eq!(get(&data, "/v1/generate?name=ab&min_length=3&max_length=2").await.0, StatusCode::BAD_REQUEST);
		assert_eq!(get(&data, "/v1/generate?name=ab&count=0").await.0, StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn reports_failed_walks() {
		let data = shared_data(PathBuf::from("."));
		let (status, body) = get(&data, "/v1/generate?name=ab&min_length=0&max_length=1&seed=3").await;
		assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
		assert!(body.starts_with("Exceeded maximum walk length"));
	}

	#[actix_web::test]
	async fn loads_automata_from_data_dir() -> Result<(), Box<dyn std::error::Error>> {
		let dir = tempfile::tempdir()?;
		Automaton::literal("xyz").save(dir.path().join("xyz.bin"))?;
		Automaton::literal("q").save(dir.path().join("q.bin"))?;
		let data = shared_data(dir.path().to_path_buf());

		assert_eq!(get(&data, "/v1/automata").await, (StatusCode::OK, "q\nxyz".to_owned()));
		assert_eq!(get(&data, "/v1/loaded_automata").await, (StatusCode::OK, "ab".to_owned()));

		let app = test::init_service(App::new().app_data(data.clone()).service(put_automata)).await;
		let resp = test::call_service(&app, test::TestRequest::put().uri("/v1/load_automata?names=xyz,q").to_request()).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let resp = test::call_service(&app, test::TestRequest::put().uri("/v1/load_automata?names=nope").to_request()).await;
		assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

		assert_eq!(get(&data, "/v1/loaded_automata").await, (StatusCode::OK, "q\nxyz".to_owned()));
		assert_eq!(get(&data, "/v1/generate?name=xyz").await, (StatusCode::OK, "xyz".to_owned()));
		Ok(())
	}
}
