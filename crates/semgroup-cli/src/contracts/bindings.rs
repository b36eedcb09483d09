use ethers::contract::abigen;

abigen!(
    Semaphore,
    r#"[
        struct SemaphoreProof { uint256 merkleTreeDepth; uint256 merkleTreeRoot; uint256 nullifier; uint256 message; uint256 scope; uint256[8] points; }
        function createGroup(address admin) external returns (uint256)
        function addMember(uint256 groupId, uint256 identityCommitment) external
        function addMembers(uint256 groupId, uint256[] identityCommitments) external
        function updateMember(uint256 groupId, uint256 oldIdentityCommitment, uint256 newIdentityCommitment, uint256[] merkleProofSiblings) external
        function removeMember(uint256 groupId, uint256 identityCommitment, uint256[] merkleProofSiblings) external
        function validateProof(uint256 groupId, SemaphoreProof proof) external
        function verifyProof(uint256 groupId, SemaphoreProof proof) external view returns (bool)
        function getMerkleTreeRoot(uint256 groupId) external view returns (uint256)
        function getMerkleTreeDepth(uint256 groupId) external view returns (uint256)
        function getMerkleTreeSize(uint256 groupId) external view returns (uint256)
        function hasMember(uint256 groupId, uint256 identityCommitment) external view returns (bool)
        function indexOf(uint256 groupId, uint256 identityCommitment) external view returns (uint256)
        event GroupCreated(uint256 indexed groupId)
        event MembersAdded(uint256 indexed groupId, uint256 startIndex, uint256[] identityCommitments, uint256 merkleTreeRoot)
        event MemberUpdated(uint256 indexed groupId, uint256 index, uint256 identityCommitment, uint256 newIdentityCommitment, uint256 merkleTreeRoot)
        event MemberRemoved(uint256 indexed groupId, uint256 index, uint256 identityCommitment, uint256 merkleTreeRoot)
        event ProofValidated(uint256 indexed groupId, uint256 merkleTreeDepth, uint256 indexed merkleTreeRoot, uint256 nullifier, uint256 message, uint256 indexed scope, uint256[8] points)
    ]"#
);
