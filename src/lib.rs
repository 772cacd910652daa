/*!
Looks up QS World University Rankings metrics for institution names.

The rankings workbook is read with calamine the first time it is needed, and cleaned and
reconciled with the [qs_rankings] crate.

```no_run
use qs_rankings::Column;

let score = uniranks::get_metric("Imperial College", Column::OverallScore)?;
let table = uniranks::get_score_table(qs_rankings::BST_DESTINATIONS)?;
# Ok::<(), uniranks::RankingsError>(())
```
*/

pub mod rankings;

pub use crate::rankings::{
    get_metric, get_score_table, read_data, reset_data, RankingStore, RankingsError,
    RankingsResult,
};
