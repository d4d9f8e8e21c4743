use actix_cors::Cors;
use actix_web::http::header::ContentType;
use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;

use crate::chart::payoff_figure;
use crate::config::{ServeArgs, STRIKE_GRID};
use crate::error::Result;
use crate::payoff::{calculate_pnl, ExpiryDays, Payoff, StrikeSeries};
use crate::table;

const DASHBOARD_HTML: &str = include_str!("dashboard.html");

#[derive(Debug, Deserialize)]
struct PayoffQuery {
    initial_target_price: i64,
    expiry_days: i64,
}

impl PayoffQuery {
    fn payoff(&self) -> Result<Payoff> {
        let strikes = StrikeSeries::from_grid(&STRIKE_GRID)?;
        let expiry_days = ExpiryDays::new(self.expiry_days)?;
        calculate_pnl(&strikes, self.initial_target_price as f64, expiry_days)
    }
}

#[get("/get_graph_data/")]
async fn get_graph_data(query: web::Query<PayoffQuery>) -> actix_web::Result<HttpResponse> {
    log::debug!("graph data for {:?}", query);
    let payoff = query.payoff()?;
    Ok(HttpResponse::Ok().json(payoff_figure(&payoff)))
}

#[get("/get_table_data/")]
async fn get_table_data(query: web::Query<PayoffQuery>) -> actix_web::Result<HttpResponse> {
    log::debug!("table data for {:?}", query);
    let payoff = query.payoff()?;
    let body = table::to_csv(&payoff).map_err(|e| {
        log::error!("failed to write payoff table: {}", e);
        actix_web::error::ErrorInternalServerError(e)
    })?;
    Ok(HttpResponse::Ok().content_type("text/csv").body(body))
}

#[get("/get_readout/")]
async fn get_readout(query: web::Query<PayoffQuery>) -> actix_web::Result<HttpResponse> {
    let payoff = query.payoff()?;
    Ok(HttpResponse::Ok().json(payoff.readout()))
}

#[get("/")]
async fn dashboard() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(DASHBOARD_HTML)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_graph_data)
        .service(get_table_data)
        .service(get_readout)
        .service(dashboard);
}

pub async fn run(args: ServeArgs) -> std::io::Result<()> {
    let addr = args.bind_addr();
    log::info!("serving payoff charts on http://{}:{}", addr.0, addr.1);

    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(addr)?
    .run()
    .await
}
