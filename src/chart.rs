//! Plotly-compatible figure document for a payoff.

use serde::Serialize;

use crate::payoff::Payoff;

#[derive(Debug, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub name: String,
    pub line: Line,
}

#[derive(Debug, Serialize)]
pub struct Line {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Serialize)]
pub struct Legend {
    pub orientation: &'static str,
    pub yanchor: &'static str,
    pub y: f64,
    pub xanchor: &'static str,
    pub x: f64,
}

#[derive(Debug, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
    pub margin: Margin,
    pub hovermode: &'static str,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}

/// Vertical marker at the strike closest to the target.
#[derive(Debug, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub line: Line,
}

#[derive(Debug, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Serialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub showarrow: bool,
    pub arrowhead: u32,
    pub font: Font,
    pub arrowcolor: &'static str,
}

fn title(text: &str) -> Title {
    Title {
        text: text.to_string(),
    }
}

fn line_trace(x: Vec<f64>, y: Vec<f64>, name: String, color: &'static str) -> Trace {
    Trace {
        kind: "scatter",
        x,
        y,
        mode: "lines",
        name,
        line: Line { color, width: None },
    }
}

fn annotation(x: f64, y: f64, text: String, arrowcolor: &'static str) -> Annotation {
    Annotation {
        x,
        y,
        text,
        showarrow: true,
        arrowhead: 1,
        font: Font { size: 12 },
        arrowcolor,
    }
}

pub fn payoff_figure(payoff: &Payoff) -> Figure {
    let strikes = payoff.strikes();
    let readout = payoff.readout();

    let (low, high) = payoff
        .expiry
        .pnl_values()
        .into_iter()
        .chain(payoff.current.pnl_values())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let data = vec![
        line_trace(
            strikes.clone(),
            payoff.expiry.pnl_values(),
            "Expiry Day P&L".to_string(),
            "blue",
        ),
        line_trace(
            strikes,
            payoff.current.pnl_values(),
            format!("P&L with {} days to expiry", payoff.expiry_days.days()),
            "orange",
        ),
    ];

    let layout = Layout {
        title: title("Option Strategy Payoff"),
        xaxis: Axis {
            title: title("Strike Price"),
        },
        yaxis: Axis {
            title: title("Profit / Loss"),
        },
        legend: Legend {
            orientation: "h",
            yanchor: "bottom",
            y: -0.5,
            xanchor: "center",
            x: 0.5,
        },
        margin: Margin {
            l: 0,
            r: 0,
            t: 50,
            b: 100,
        },
        hovermode: "x unified",
        shapes: vec![Shape {
            kind: "line",
            x0: readout.closest_strike,
            x1: readout.closest_strike,
            y0: low,
            y1: high,
            line: Line {
                color: "RoyalBlue",
                width: Some(2),
            },
        }],
        annotations: vec![
            annotation(
                readout.closest_strike,
                readout.current_pnl,
                format!("Projected P&L: {:.2}", readout.current_pnl),
                "orange",
            ),
            annotation(
                readout.closest_strike,
                readout.expiry_pnl,
                format!("Expiry P&L: {:.2}", readout.expiry_pnl),
                "blue",
            ),
        ],
    };

    Figure { data, layout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STRIKE_GRID;
    use crate::payoff::{calculate_pnl, ExpiryDays, StrikeSeries};

    #[test]
    fn figure_has_expiry_and_current_traces() {
        let strikes = StrikeSeries::from_grid(&STRIKE_GRID).unwrap();
        let payoff = calculate_pnl(&strikes, 22000.0, ExpiryDays::new(30).unwrap()).unwrap();
        let value = serde_json::to_value(payoff_figure(&payoff)).unwrap();

        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"], "Expiry Day P&L");
        assert_eq!(data[0]["type"], "scatter");
        assert_eq!(data[0]["line"]["color"], "blue");
        assert_eq!(data[1]["name"], "P&L with 30 days to expiry");
        assert_eq!(data[1]["line"]["color"], "orange");

        for trace in data {
            assert_eq!(trace["x"].as_array().unwrap().len(), 51);
            assert_eq!(trace["y"].as_array().unwrap().len(), 51);
            assert_eq!(trace["x"][50], 25000.0);
            assert_eq!(trace["y"][50], 3000.0);
        }

        assert_eq!(value["layout"]["title"]["text"], "Option Strategy Payoff");
        assert_eq!(value["layout"]["xaxis"]["title"]["text"], "Strike Price");
        assert_eq!(value["layout"]["legend"]["y"], -0.5);
        assert_eq!(value["layout"]["margin"]["b"], 100);
        assert_eq!(value["layout"]["hovermode"], "x unified");
        assert!(data[0]["line"].get("width").is_none());
    }

    #[test]
    fn closest_strike_is_marked() {
        let strikes = StrikeSeries::from_grid(&STRIKE_GRID).unwrap();
        let payoff = calculate_pnl(&strikes, 23721.0, ExpiryDays::new(15).unwrap()).unwrap();
        let value = serde_json::to_value(payoff_figure(&payoff)).unwrap();

        let shapes = value["layout"]["shapes"].as_array().unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0]["type"], "line");
        assert_eq!(shapes[0]["x0"], 23700.0);
        assert_eq!(shapes[0]["x1"], 23700.0);
        assert_eq!(shapes[0]["y0"], -3721.0);
        assert_eq!(shapes[0]["y1"], 1279.0);
        assert_eq!(shapes[0]["line"]["width"], 2);

        let annotations = value["layout"]["annotations"].as_array().unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0]["x"], 23700.0);
        assert_eq!(annotations[0]["y"], -10.5);
        assert_eq!(annotations[0]["text"], "Projected P&L: -10.50");
        assert_eq!(annotations[1]["y"], -21.0);
        assert_eq!(annotations[1]["text"], "Expiry P&L: -21.00");
    }
}
