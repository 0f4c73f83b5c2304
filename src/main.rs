#[cfg(feature = "ssr")]
use actix_files::{Files, NamedFile};
#[cfg(feature = "ssr")]
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};

#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_web::{App, HttpServer};
    use leptos::get_configuration;
    use leptos::logging::{error, log};

    // Load configuration
    let conf = match get_configuration(None).await {
        Ok(conf) => conf,
        Err(e) => {
            error!("[SERVER] Could not read Leptos configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };
    let addr = conf.leptos_options.site_addr;
    let site_root = conf.leptos_options.site_root.to_string();
    log!("[SERVER] Serving {} on http://{}", site_root, addr);

    HttpServer::new(move || {
        let root = site_root.clone();
        let index = format!("{root}/index.html");
        App::new()
            // Static bundle; unknown paths fall back to index.html so client routes load.
            .service(
                Files::new("/", &root)
                    .index_file("index.html")
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let index = index.clone();
                        async move {
                            let (req, _) = req.into_parts();
                            let file = NamedFile::open_async(&index).await?;
                            let res = file.into_response(&req);
                            Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
                        }
                    })),
            )
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // build with `--features csr` for the browser bundle
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // to run: `trunk serve --open --no-default-features --features csr`
    use reviewgate::app::App;

    reviewgate::utils::panic_hook::init();
    leptos::mount_to_body(App);
}
