use ethers::contract::abigen;

abigen!(
    MuddedNft,
    r"[
        function presaleMint() external payable

        function mint() external payable

        function startPresale() external

        function presaleStarted() external view returns (bool)

        function presaleEnded() external view returns (uint256)

        function owner() external view returns (address)

        function tokenIds() external view returns (uint256)
    ]"
);
