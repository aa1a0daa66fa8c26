//! Structural signature command

use crate::config::TesseraConfig;
use anyhow::Result;
use tessera_signature::{ExactSignature, SkeletonSignature};
use tessera_tree::load_tree;

pub fn run(file: &str, skeleton: bool, config: &TesseraConfig) -> Result<()> {
    let tree = load_tree(file)?;

    if skeleton {
        let sig = SkeletonSignature::of(tree.root(), config.signature.skeleton_max_depth);
        println!("{}  {}", sig.hash().short_hex(), sig);
    } else {
        let sig = ExactSignature::of(tree.root(), config.signature.exact_max_depth);
        println!("{}  {}", sig.hash().short_hex(), sig);
    }
    Ok(())
}
