pub mod core;
pub mod storage;
pub mod analysis;
pub mod node;
pub mod dispatch;
pub mod parallel;

/*
┌──────────────────────────────────────────────────────────────────────────┐
│                        MIRADOR STRUCT ARCHITECTURE                        │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────── DISPATCH LAYER ─────────────────────────────┐
│  struct Dispatcher                                                       │
│    workers: Vec<Worker>       // fixed pool, all sharing one store       │
│    cursor: AtomicUsize        // round-robin, advance+read is atomic     │
│                                                                          │
│  struct ParallelProcessor                                                │
│    pool: rayon::ThreadPool    // batch submission                        │
│    progress: Arc<AtomicUsize>                                            │
└──────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── NODE LAYER ───────────────────────────────┐
│  struct Worker                                                           │
│    id: usize                  // identity only, no other private state   │
│    store: Arc<PersistedStore>                                            │
│    ids: Arc<IdSupplier>       // AtomicU64, unique increasing ids        │
│    analyzer: Arc<dyn Analyzer>        // document -> ScoreMap            │
│    planner: Arc<dyn DimensionPlanner> // topic -> dimension names        │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────── STORAGE LAYER ──────────────────────────────┐
│  struct PersistedStore                                                   │
│    path: PathBuf              // single JSON file, rewritten per write   │
│    data: Mutex<StoreData>     // lock covers memory + disk rewrite       │
│                                                                          │
│  struct StoreData             // the three namespaces                    │
│    campaigns: HashMap<CampaignId, Campaign>                              │
│    articles:  HashMap<CampaignId, HashMap<ArticleId, ScoreMap>>          │
│    by_date:   HashMap<CampaignId, HashMap<Date, HashMap<.., ScoreMap>>>  │
└──────────────────────────────────────────────────────────────────────────┘

  caller ──> Dispatcher.select_worker() ──> Worker.<op>()
                 │                              │
                 │                              ├──> Analyzer / Planner
                 │                              │    (no store lock held)
                 │                              └──> PersistedStore get/set
                 └── failures propagate unchanged, no queueing, no retry
*/
