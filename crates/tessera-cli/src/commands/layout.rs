//! Layout inference command

use anyhow::Result;
use tessera_rules::infer_layout;
use tessera_tree::{load_tree, save_tree, save_tree_string};

pub fn run(file: &str, output: Option<&str>) -> Result<()> {
    let mut tree = load_tree(file)?;
    infer_layout(&mut tree);

    match output {
        Some(path) => {
            save_tree(path, &tree)?;
            eprintln!("Layout attributes written to {}", path);
        }
        None => println!("{}", save_tree_string(&tree)?),
    }
    Ok(())
}
