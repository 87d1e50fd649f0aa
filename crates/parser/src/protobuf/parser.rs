//! Default proto-parsing collaborator backed by protox and prost-reflect

use super::schema::message_schema;
use super::types::{ProtoDocument, ProtoResolution, ProtoResolver, ProtoService, ResolvedRpc};
use prost_reflect::{DescriptorPool, FileDescriptor, MethodDescriptor};
use prost_types::FileOptions;
use protox::file::{ChainFileResolver, File, FileResolver, GoogleFileResolver};
use protox::Compiler;
use spec_catalog_common::{CatalogError, Result, DEFAULT_SCHEMA_ID_PREFIX};
use std::path::Path;
use tracing::debug;

/// Field numbers locating methods in `FileDescriptorProto` source info
const SERVICE_FIELD: i32 = 6;
const METHOD_FIELD: i32 = 2;

/// Compiles `.proto` source text in memory
///
/// Imports of the `google/protobuf/*` well-known types resolve from the
/// bundled copies; any other import is reported as a collaborator error.
#[derive(Debug, Clone)]
pub struct ProtoxResolver {
    id_prefix: String,
}

impl Default for ProtoxResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtoxResolver {
    pub fn new() -> Self {
        Self {
            id_prefix: DEFAULT_SCHEMA_ID_PREFIX.to_string(),
        }
    }

    /// Use a custom domain prefix for the `$id` of generated schemas
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Compile one source file into a descriptor pool
    pub fn compile(&self, file_name: &str, source: &str) -> Result<DescriptorPool> {
        let mut resolver = ChainFileResolver::new();
        resolver.add(SourceFileResolver {
            name: file_name.to_string(),
            source: source.to_string(),
        });
        resolver.add(GoogleFileResolver::new());

        let mut compiler = Compiler::with_file_resolver(resolver);
        compiler.include_imports(true).include_source_info(true);
        compiler
            .open_file(file_name)
            .map_err(|e| CatalogError::Collaborator(e.to_string()))?;

        Ok(compiler.descriptor_pool())
    }

    fn resolve_method(&self, file: &FileDescriptor, method: &MethodDescriptor) -> ResolvedRpc {
        let service = method.parent_service();
        let path = if file.package_name().is_empty() {
            format!("/{}/{}", service.name(), method.name())
        } else {
            format!("/{}.{}/{}", file.package_name(), service.name(), method.name())
        };

        ResolvedRpc {
            operation_id: format!("{}_{}", service.name(), method.name()),
            service_name: service.name().to_string(),
            method_name: method.name().to_string(),
            path,
            summary: leading_comment(file, service.index(), method.index()),
            request_type: method.input().full_name().to_string(),
            response_type: method.output().full_name().to_string(),
            request_stream: method.is_client_streaming(),
            response_stream: method.is_server_streaming(),
            request_schema: message_schema(&method.input(), &self.id_prefix),
            response_schema: message_schema(&method.output(), &self.id_prefix),
        }
    }
}

impl ProtoResolver for ProtoxResolver {
    fn resolve(&self, file_name: &str, source: &str) -> Result<ProtoResolution> {
        let pool = self.compile(file_name, source)?;
        let file = pool.get_file_by_name(file_name).ok_or_else(|| {
            CatalogError::Collaborator(format!("{} missing from compiled descriptors", file_name))
        })?;

        let mut document = ProtoDocument {
            package: file.package_name().to_string(),
            language_package: file
                .file_descriptor_proto()
                .options
                .as_ref()
                .and_then(language_package),
            services: Vec::new(),
        };
        let mut operations = Vec::new();

        for service in file.services() {
            let methods: Vec<MethodDescriptor> = service.methods().collect();
            document.services.push(ProtoService {
                name: service.full_name().to_string(),
                methods: methods.iter().map(|m| m.name().to_string()).collect(),
            });
            operations.extend(methods.iter().map(|m| self.resolve_method(&file, m)));
        }

        debug!(
            file = file_name,
            services = document.services.len(),
            methods = operations.len(),
            "compiled proto file"
        );
        Ok(ProtoResolution {
            document,
            operations,
        })
    }
}

fn language_package(options: &FileOptions) -> Option<String> {
    options
        .java_package
        .clone()
        .or_else(|| options.go_package.clone())
        .or_else(|| options.csharp_namespace.clone())
}

/// Leading comment attached to a method, trimmed
fn leading_comment(file: &FileDescriptor, service: usize, method: usize) -> Option<String> {
    let info = file.file_descriptor_proto().source_code_info.as_ref()?;
    let path = [SERVICE_FIELD, service as i32, METHOD_FIELD, method as i32];

    info.location
        .iter()
        .find(|location| location.path == path)
        .and_then(|location| location.leading_comments.as_deref())
        .map(str::trim)
        .filter(|comment| !comment.is_empty())
        .map(String::from)
}

/// Serves the single in-memory source file under its own name
struct SourceFileResolver {
    name: String,
    source: String,
}

impl FileResolver for SourceFileResolver {
    fn resolve_path(&self, path: &Path) -> Option<String> {
        (path == Path::new(&self.name)).then(|| self.name.clone())
    }

    fn open_file(&self, name: &str) -> std::result::Result<File, protox::Error> {
        if name == self.name {
            File::from_source(name, &self.source)
        } else {
            Err(protox::Error::file_not_found(name))
        }
    }
}
