//! Tabular and CSV output of solved forcing records.

use lf_solver::LeafSolution;

/// Outcome of solving one forcing record.
pub struct RecordOutcome {
    pub id: String,
    pub result: Result<LeafSolution, String>,
}

const CANOPY_HEADER: &str = "id,status,an_canopy,gsw_canopy,et_canopy";
const DETAIL_HEADER: &str = ",sun_up,solar_elevation,tleaf,an,gsc,ci,et,le_et,cs,dleaf,iterations,last_delta";

pub fn to_csv(outcomes: &[RecordOutcome], detailed: bool) -> String {
    let mut csv = String::from(CANOPY_HEADER);
    if detailed {
        csv.push_str(DETAIL_HEADER);
    }
    csv.push('\n');

    for o in outcomes {
        match &o.result {
            Ok(s) => {
                csv.push_str(&format!(
                    "{},ok,{},{},{}",
                    o.id, s.canopy.an, s.canopy.gsw, s.canopy.et
                ));
                if detailed {
                    csv.push_str(&format!(
                        ",{},{},{},{},{},{},{},{},{},{},{},{}",
                        s.sun_up,
                        s.solar_elevation,
                        s.leaf_temperature,
                        s.an,
                        s.gsc,
                        s.ci,
                        s.et,
                        s.le_et,
                        s.surface_co2,
                        s.surface_vpd,
                        s.iterations,
                        s.last_delta
                    ));
                }
            }
            Err(_) => {
                csv.push_str(&format!("{},failed,,,", o.id));
                if detailed {
                    csv.push_str(&",".repeat(12));
                }
            }
        }
        csv.push('\n');
    }
    csv
}

pub fn print_table(outcomes: &[RecordOutcome], detailed: bool) {
    if detailed {
        println!(
            "{:<12} {:>10} {:>10} {:>12} {:>8} {:>8} {:>6}",
            "id", "An", "gsw", "E", "Tleaf", "Ci", "iter"
        );
    } else {
        println!("{:<12} {:>10} {:>10} {:>12}", "id", "An", "gsw", "E");
    }

    for o in outcomes {
        match &o.result {
            Ok(s) if detailed => println!(
                "{:<12} {:>10.3} {:>10.4} {:>12.6} {:>8.2} {:>8.1} {:>6}",
                o.id,
                s.canopy.an,
                s.canopy.gsw,
                s.canopy.et,
                s.leaf_temperature,
                s.ci,
                s.iterations
            ),
            Ok(s) => println!(
                "{:<12} {:>10.3} {:>10.4} {:>12.6}",
                o.id, s.canopy.an, s.canopy.gsw, s.canopy.et
            ),
            Err(e) => println!("{:<12} failed: {}", o.id, e),
        }
    }
}
