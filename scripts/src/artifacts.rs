//! Resolution of blueprint names to compiled contract artifacts.
//!
//! Artifacts are laid out the way Hardhat writes them:
//! `<root>/<source path>/<ContractName>.json`, where the source path ends in
//! the `.sol` file the contract was declared in.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier},
    json_abi::{JsonAbi, Param},
    primitives::Bytes,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{ARTIFACT_EXTENSION, FULLY_QUALIFIED_NAME_SEPARATOR, SOLIDITY_SOURCE_EXTENSION},
    errors::ScriptError,
};

/// A compiled contract, as emitted by the compiler toolchain
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The name of the contract
    pub contract_name: String,
    /// The path of the source file the contract is declared in
    pub source_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The contract's creation bytecode
    pub bytecode: Bytes,
}

impl Artifact {
    /// The fully qualified name of the contract, e.g. `contracts/NFT.sol:NFT`
    pub fn fully_qualified_name(&self) -> String {
        format!(
            "{}{}{}",
            self.source_name, FULLY_QUALIFIED_NAME_SEPARATOR, self.contract_name
        )
    }

    /// The creation bytecode followed by the ABI-encoded constructor arguments.
    ///
    /// Integers are sized to the width of the matching constructor parameter.
    /// The arguments are type-checked against the constructor's signature, so a
    /// mismatched argument list never reaches the network.
    pub fn creation_code(&self, args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        let encoded_args = match &self.abi.constructor {
            Some(constructor) => {
                if constructor.inputs.len() != args.len() {
                    return Err(ScriptError::CalldataConstruction(format!(
                        "{} takes {} constructor arguments, but {} were given",
                        self.contract_name,
                        constructor.inputs.len(),
                        args.len()
                    )));
                }

                let args = constructor
                    .inputs
                    .iter()
                    .zip(args)
                    .map(|(param, value)| fit_to_param(param, value))
                    .collect::<Result<Vec<_>, _>>()?;

                constructor
                    .abi_encode_input(&args)
                    .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?
            }
            None if args.is_empty() => Vec::new(),
            None => {
                return Err(ScriptError::CalldataConstruction(format!(
                    "{} has no constructor, but {} arguments were given",
                    self.contract_name,
                    args.len()
                )))
            }
        };

        let mut code = self.bytecode.to_vec();
        code.extend(encoded_args);
        Ok(code.into())
    }
}

/// A directory of compiled artifacts
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    /// The root of the artifacts tree
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the artifact for a blueprint.
    ///
    /// The blueprint may be a bare contract name (`NFT`) or a fully qualified
    /// one (`contracts/NFT.sol:NFT`). A bare name must be unique across the
    /// artifacts tree.
    pub fn load(&self, blueprint: &str) -> Result<Artifact, ScriptError> {
        let path = self.find(blueprint)?;
        debug!("loading artifact for {blueprint} from {}", path.display());

        let contents =
            fs::read_to_string(&path).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        let artifact: Artifact = serde_json::from_str(&contents)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

        if artifact.contract_name != contract_name(blueprint) {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} declares contract {}, expected {}",
                path.display(),
                artifact.contract_name,
                contract_name(blueprint)
            )));
        }

        if artifact.bytecode.is_empty() {
            return Err(ScriptError::ArtifactResolution(format!(
                "{} is abstract or an interface and cannot be deployed",
                artifact.fully_qualified_name()
            )));
        }

        Ok(artifact)
    }

    /// Find the path of the artifact file for a blueprint
    pub fn find(&self, blueprint: &str) -> Result<PathBuf, ScriptError> {
        if let Some((source, name)) = blueprint.rsplit_once(FULLY_QUALIFIED_NAME_SEPARATOR) {
            let path = self.root.join(source).join(artifact_file_name(name));
            if !path.is_file() {
                return Err(ScriptError::ArtifactResolution(format!(
                    "no artifact for {blueprint} at {}",
                    path.display()
                )));
            }

            return Ok(path);
        }

        let mut candidates = Vec::new();
        collect_candidates(&self.root, &artifact_file_name(blueprint), &mut candidates)
            .map_err(|e| {
                ScriptError::ArtifactResolution(format!("{}: {}", self.root.display(), e))
            })?;
        candidates.sort();

        match candidates.len() {
            0 => Err(ScriptError::ArtifactResolution(format!(
                "no artifact for {blueprint} under {}",
                self.root.display()
            ))),
            1 => Ok(candidates.remove(0)),
            _ => {
                let names = candidates
                    .iter()
                    .map(|path| self.qualified_name_of(path, blueprint))
                    .collect::<Vec<_>>();

                Err(ScriptError::ArtifactResolution(format!(
                    "{blueprint} is ambiguous, use one of: {}",
                    names.join(", ")
                )))
            }
        }
    }

    /// The fully qualified name of the contract stored at `path`
    fn qualified_name_of(&self, path: &Path, name: &str) -> String {
        let source = path
            .parent()
            .and_then(|dir| dir.strip_prefix(&self.root).ok())
            .map(|dir| {
                dir.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();

        format!("{source}{FULLY_QUALIFIED_NAME_SEPARATOR}{name}")
    }
}

/// Size an integer argument to the width of the parameter it is passed as.
/// Other values are passed through for the encoder to type-check.
fn fit_to_param(param: &Param, value: &DynSolValue) -> Result<DynSolValue, ScriptError> {
    let ty: DynSolType = param
        .resolve()
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;

    match (&ty, value) {
        (DynSolType::Uint(bits), DynSolValue::Uint(n, _)) => {
            if n.bit_len() > *bits {
                return Err(ScriptError::CalldataConstruction(format!(
                    "{n} does not fit in {} parameter `{}`",
                    ty, param.name
                )));
            }

            Ok(DynSolValue::Uint(*n, *bits))
        }
        _ => Ok(value.clone()),
    }
}

/// The contract name part of a possibly fully qualified blueprint name
fn contract_name(blueprint: &str) -> &str {
    blueprint
        .rsplit_once(FULLY_QUALIFIED_NAME_SEPARATOR)
        .map_or(blueprint, |(_, name)| name)
}

/// The file name an artifact for the given contract is stored under
fn artifact_file_name(name: &str) -> String {
    format!("{name}.{ARTIFACT_EXTENSION}")
}

/// Recursively collect files named `file_name` that sit in a Solidity
/// source directory
fn collect_candidates(
    dir: &Path,
    file_name: &str,
    candidates: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_candidates(&path, file_name, candidates)?;
            continue;
        }

        let in_source_dir = dir
            .extension()
            .is_some_and(|ext| ext == SOLIDITY_SOURCE_EXTENSION);
        if in_source_dir && path.file_name().is_some_and(|name| name == file_name) {
            candidates.push(path);
        }
    }

    Ok(())
}
