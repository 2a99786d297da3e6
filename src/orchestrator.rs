//! Pipeline orchestrator for ragyt.
//!
//! Coordinates one question from documents to answer: chunk, embed, index,
//! then hand the index to an agent. The index lives only as long as the call.

use crate::agent::{Agent, AgentResponse, RetrievalTool, ToolRegistry};
use crate::chunking::{Chunk, Chunker, ChunkingConfig, WindowChunker};
use crate::config::{Prompts, Settings};
use crate::document::Document;
use crate::embedding::{create_embedder, Embedder};
use crate::error::Result;
use crate::llm::{LlmBackend, OpenAiChatBackend};
use crate::vector_store::{MemoryVectorStore, SearchOptions, SearchResult};
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the ragyt pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    chunker: WindowChunker,
    embedder: Arc<dyn Embedder>,
    backend: Option<Arc<dyn LlmBackend>>,
}

impl Orchestrator {
    /// Create an orchestrator with the components named in the settings.
    ///
    /// The chat backend is created on first use, so chunking and search work
    /// without LLM credentials.
    pub fn new(settings: Settings) -> Result<Self> {
        let embedder = create_embedder(&settings.embedding)?;
        Self::build(settings, embedder, None)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        embedder: Arc<dyn Embedder>,
        backend: Arc<dyn LlmBackend>,
    ) -> Result<Self> {
        Self::build(settings, embedder, Some(backend))
    }

    fn build(
        settings: Settings,
        embedder: Arc<dyn Embedder>,
        backend: Option<Arc<dyn LlmBackend>>,
    ) -> Result<Self> {
        settings.validate()?;
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let chunker = WindowChunker::new(ChunkingConfig::try_from(&settings.chunking)?);

        Ok(Self {
            settings,
            prompts,
            chunker,
            embedder,
            backend,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a reference to the embedder.
    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }

    /// Split all documents, keeping chunk order within each document.
    pub fn chunk(&self, documents: &[Document]) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::new();
        for document in documents {
            chunks.extend(self.chunker.split(document)?);
        }
        Ok(chunks)
    }

    /// Chunk, embed and index the documents.
    #[instrument(skip(self, documents), fields(documents = documents.len()))]
    pub async fn build_index(&self, documents: &[Document]) -> Result<MemoryVectorStore> {
        let chunks = self.chunk(documents)?;
        info!("Indexing {} chunks", chunks.len());

        let mut index = MemoryVectorStore::new(self.embedder.clone());
        index.index_chunks(chunks).await?;
        Ok(index)
    }

    /// Retrieval options from the settings.
    pub fn retrieval_options(&self) -> SearchOptions {
        let options = SearchOptions::top_k(self.settings.retrieval.k);
        match self.settings.retrieval.min_score {
            Some(min) => options.with_min_score(min),
            None => options,
        }
    }

    /// An agent whose retrieval tool searches `index`.
    pub fn agent(&self, index: Arc<MemoryVectorStore>) -> Result<Agent> {
        let tool = RetrievalTool::with_options(index, self.retrieval_options())
            .with_description(&self.prompts.retrieve_description());
        let tools = ToolRegistry::new().with_tool(Arc::new(tool));

        let backend = match &self.backend {
            Some(backend) => backend.clone(),
            None => Arc::new(
                OpenAiChatBackend::from_settings(&self.settings.llm)?
                    .with_system_prompt(&self.prompts.agent_system()),
            ),
        };

        Ok(Agent::new(backend, tools).with_max_turns(self.settings.agent.max_turns))
    }

    /// Answer a question about the documents. The index is dropped afterwards.
    #[instrument(skip(self, documents))]
    pub async fn ask(&self, documents: &[Document], question: &str) -> Result<AgentResponse> {
        let index = Arc::new(self.build_index(documents).await?);
        self.agent(index)?.run(question).await
    }

    /// Rank the documents' chunks against a query.
    pub async fn search(
        &self,
        documents: &[Document],
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        let index = self.build_index(documents).await?;
        index.search_with(query, options).await
    }
}
