//! `if` / `else if` / `else` navigation.

use super::decl::IfChain;
use super::Explorer;
use crate::ts::{ParseContext, Shape};

impl Explorer {
    /// `if` statements directly inside the wrapped scope.
    pub fn find_ifs(&self) -> Vec<Explorer> {
        self.scope_with(|node| node.shape() == Shape::If)
    }

    /// Conditions of the wrapped `if` chain, outermost first.
    ///
    /// A final plain `else` contributes an empty handle, so the result lines
    /// up with [`Explorer::find_if_bodies`].
    pub fn find_conditions(&self) -> Vec<Explorer> {
        let Some(chain) = self.node.as_ref().and_then(IfChain::new) else {
            return Vec::new();
        };
        let mut conditions: Vec<Explorer> = chain
            .conditions()
            .map(|condition| Explorer::wrap(condition, ParseContext::Generic))
            .collect();
        if chain.otherwise().is_some() {
            conditions.push(Explorer::empty());
        }
        conditions
    }

    /// Branch statements of the wrapped `if` chain, ending with the final
    /// `else` when present. Braced branches are blocks and act as scopes.
    pub fn find_if_bodies(&self) -> Vec<Explorer> {
        let Some(chain) = self.node.as_ref().and_then(IfChain::new) else {
            return Vec::new();
        };
        chain
            .consequences()
            .chain(chain.otherwise())
            .map(|body| Explorer::wrap(body, ParseContext::Generic))
            .collect()
    }
}
