mod azure_doc_intel_adapter;
mod extractor_factory;

pub use azure_doc_intel_adapter::{
    API_VERSION, AnalyzeLine, AnalyzePage, AnalyzeResponse, AnalyzeResult, AzureDocIntelAdapter,
    DEFAULT_MODEL_ID,
};
pub use extractor_factory::ExtractorFactory;
