#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use cyshop_reviews::api::{create_review, get_purchases, get_reviews, refresh_catalog};
    use cyshop_reviews::app::*;
    use cyshop_reviews::catalog::CatalogCache;
    use cyshop_reviews::config::Settings;
    use cyshop_reviews::db::Database;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};

    // Connect the shared pool and make sure the review schema exists.
    let settings = Settings::from_env().expect("database settings missing from environment");
    let db = Database::new(&settings)
        .await
        .expect("failed to connect to the review store");
    db.create_schema()
        .await
        .expect("failed to ensure the review schema");

    // Warm the catalog once; a failure here is logged, not fatal, since
    // every request retries the load.
    let cache = web::Data::new(CatalogCache::new());
    if let Err(err) = cache.get_or_load(&db).await {
        leptos::logging::error!("Catalog load failed at startup: {}", err);
    }
    let db = web::Data::new(db);

    // Load configuration
    let conf = get_configuration(None).await.unwrap();
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    println!("listening on http://{}", &addr);

    // Start the Actix Web server
    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .app_data(db.clone())
            .app_data(cache.clone())
            // Register custom API routes BEFORE Leptos server functions
            .service(
                web::scope("/api")
                    .route("/purchases", web::get().to(get_purchases)) // GET /api/purchases?name=
                    .route("/reviews", web::post().to(create_review)) // POST /api/reviews
                    .route(
                        "/products/{product_id}/reviews",
                        web::get().to(get_reviews),
                    ) // GET /api/products/{id}/reviews
                    .route("/catalog/refresh", web::post().to(refresh_catalog)), // POST /api/catalog/refresh
            )
            // Register server functions
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns())
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            // Pass Leptos options to the app
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // unless we want this to work with e.g., Trunk for pure client-side testing
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // prefer using `cargo leptos serve` instead
    // to run: `trunk serve --open --features csr`
    use cyshop_reviews::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
