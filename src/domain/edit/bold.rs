use tracing::{debug, instrument};

use crate::domain::arena::{DomTree, Slot, TagNode};
use crate::domain::error::{DomainError, DomainResult};

impl DomTree {
    /// Wraps the content of every column of table row `row` (1-based) in a bold element.
    ///
    /// Expects a body element containing a table element whose children are
    /// rows and whose grandchildren are columns. Returns the number of wrapped
    /// columns. The tree is left untouched when the shape does not fit.
    #[instrument(level = "debug", skip(self))]
    pub fn bold_row(&mut self, row: usize) -> DomainResult<usize> {
        let rules = self.rules();
        let bold_label = rules.bold_label.clone();

        let body = self
            .find_descendant(self.root(), &rules.body_label)
            .ok_or_else(|| {
                DomainError::StructuralPrecondition(format!("no <{}> element", rules.body_label))
            })?;
        let table = self
            .iter_from(body)
            .skip(1)
            .find(|(_, node)| node.label == rules.table_label)
            .map(|(idx, _)| idx)
            .ok_or_else(|| {
                DomainError::StructuralPrecondition(format!(
                    "no <{}> element inside <{}>",
                    rules.table_label, rules.body_label
                ))
            })?;

        if row == 0 {
            return Err(DomainError::StructuralPrecondition(
                "rows are numbered from 1".to_string(),
            ));
        }
        let rows = self.children(table);
        let target = rows.get(row - 1).copied().ok_or_else(|| {
            DomainError::StructuralPrecondition(format!(
                "row {} requested but table has {} rows",
                row,
                rows.len()
            ))
        })?;

        let columns = self.children(target);
        for &column in &columns {
            let content = self.first_child_of(column);
            let wrapper = self.alloc(TagNode {
                label: bold_label.clone(),
                first_child: content,
                next_sibling: None,
            });
            self.slot_set(Slot::FirstChild(column), Some(wrapper));
        }

        debug!("wrapped {} columns of row {}", columns.len(), row);
        Ok(columns.len())
    }
}
