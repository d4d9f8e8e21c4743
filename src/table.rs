use std::io;

use serde::Serialize;

use crate::payoff::Payoff;

#[derive(Debug, Serialize)]
struct Row {
    strike: f64,
    expiry_pnl: f64,
    current_pnl: f64,
}

/// Writes the payoff as `strike,expiry_pnl,current_pnl` rows.
pub fn write_csv<W: io::Write>(payoff: &Payoff, out: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for (expiry, current) in payoff.expiry.points().iter().zip(payoff.current.points()) {
        writer.serialize(Row {
            strike: expiry.strike,
            expiry_pnl: expiry.pnl,
            current_pnl: current.pnl,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv(payoff: &Payoff) -> csv::Result<String> {
    let mut buffer = Vec::new();
    write_csv(payoff, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}
