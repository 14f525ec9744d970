use serde_json::{Value, json};

use crate::error::AdapterError;
use crate::schema::{PlotInventory, RemoteResult};
use crate::util;

use super::adapter::RemoteAdapter;
use super::rpc::ChiaRpc;

/// Harvester adapter
///
/// Single call: `get_plots`. Only successfully loaded plots
/// (`plots`) are counted; `failed_to_open_filenames` and
/// `not_found_filenames` are ignored.
pub struct HarvesterAdapter {
    rpc: ChiaRpc,
}

impl HarvesterAdapter {
    pub fn new(rpc: ChiaRpc) -> Self {
        Self { rpc }
    }
}

#[async_trait::async_trait]
impl RemoteAdapter for HarvesterAdapter {
    fn name(&self) -> &'static str {
        "harvester"
    }

    async fn fetch(&self) -> Result<Option<RemoteResult>, AdapterError> {
        let session = self.rpc.connect().await?;
        let response = session.call("get_plots", json!({})).await?;

        Ok(Some(RemoteResult::PlotInventory(parse_plot_inventory(
            &response,
        )?)))
    }
}

pub fn parse_plot_inventory(v: &Value) -> Result<PlotInventory, AdapterError> {
    let plots = util::array_at(v, "/plots")?;

    let mut total_size_bytes = 0.0;
    for (i, plot) in plots.iter().enumerate() {
        total_size_bytes += util::number_at(plot, "/file_size")
            .map_err(|_| AdapterError::malformed(format!("invalid field /plots/{i}/file_size")))?;
    }

    Ok(PlotInventory {
        count: plots.len() as u64,
        total_size_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_plot_sizes() {
        let v = json!({
            "plots": [
                { "filename": "a.plot", "file_size": 100, "size": 32 },
                { "filename": "b.plot", "file_size": 100, "size": 32 },
                { "filename": "c.plot", "file_size": 100, "size": 32 }
            ],
            "failed_to_open_filenames": ["x.plot"],
            "not_found_filenames": [],
            "success": true
        });

        assert_eq!(
            parse_plot_inventory(&v).unwrap(),
            PlotInventory {
                count: 3,
                total_size_bytes: 300.0,
            }
        );
    }

    #[test]
    fn no_plots_is_zero_not_failure() {
        let v = json!({ "plots": [], "success": true });

        assert_eq!(
            parse_plot_inventory(&v).unwrap(),
            PlotInventory {
                count: 0,
                total_size_bytes: 0.0,
            }
        );
    }

    #[test]
    fn plot_without_size_is_malformed() {
        let v = json!({ "plots": [{ "filename": "a.plot" }] });

        let err = parse_plot_inventory(&v).unwrap_err();
        assert!(err.to_string().contains("/plots/0/file_size"));
    }
}
